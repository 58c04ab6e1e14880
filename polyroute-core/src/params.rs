//! Route parameters keyed by capture-group position or name.

use std::collections::BTreeMap;
use std::fmt;

/// Key of a route parameter.
///
/// Unnamed capture groups are addressed by their position among the
/// top-level groups of a pattern (starting at 0), named groups by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParamKey {
    Position(usize),
    Name(String),
}

impl From<usize> for ParamKey {
    fn from(position: usize) -> Self {
        ParamKey::Position(position)
    }
}

impl From<&str> for ParamKey {
    fn from(name: &str) -> Self {
        ParamKey::Name(name.to_string())
    }
}

impl From<String> for ParamKey {
    fn from(name: String) -> Self {
        ParamKey::Name(name)
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKey::Position(position) => write!(f, "{}", position),
            ParamKey::Name(name) => f.write_str(name),
        }
    }
}

/// Ordered parameter values: positions first (ascending), then names.
///
/// # Examples
///
/// ```
/// use polyroute_core::Parameters;
///
/// let params = Parameters::new().with("name", "dolly").with(1, "hi");
/// assert_eq!(params.named("name"), Some("dolly"));
/// assert_eq!(params.positional(1), Some("hi"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    values: BTreeMap<ParamKey, String>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<ParamKey>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value, returning the previous one for that key.
    pub fn insert(&mut self, key: impl Into<ParamKey>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &ParamKey) -> Option<String> {
        self.values.remove(key)
    }

    pub fn get(&self, key: &ParamKey) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn named(&self, name: &str) -> Option<&str> {
        self.get(&ParamKey::Name(name.to_string()))
    }

    pub fn positional(&self, position: usize) -> Option<&str> {
        self.get(&ParamKey::Position(position))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParamKey, &str)> + '_ {
        self.values.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Values of positional entries, in ascending position order.
    pub fn positional_values(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.iter().filter_map(|(key, value)| match key {
            ParamKey::Position(_) => Some(value.as_str()),
            ParamKey::Name(_) => None,
        })
    }

    /// `(name, value)` pairs of named entries.
    pub fn named_values(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.values.iter().filter_map(|(key, value)| match key {
            ParamKey::Name(name) => Some((name.as_str(), value.as_str())),
            ParamKey::Position(_) => None,
        })
    }
}

impl<K, V> FromIterator<(K, V)> for Parameters
where
    K: Into<ParamKey>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Parameters::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}
