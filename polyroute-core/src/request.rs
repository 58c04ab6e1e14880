// Request metadata supplied by the host

use std::fmt;

/// Scheme and host used to build absolute URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub scheme: String,
    pub host: String,
}

impl Origin {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }
}

impl Default for Origin {
    fn default() -> Self {
        Self::new("http", "localhost")
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)
    }
}

/// The request as seen by the router: method, path (query string allowed)
/// and origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub method: String,
    pub path: String,
    pub origin: Origin,
}

impl RequestContext {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            origin: Origin::default(),
        }
    }

    pub fn with_origin(mut self, scheme: impl Into<String>, host: impl Into<String>) -> Self {
        self.origin = Origin::new(scheme, host);
        self
    }

    /// Path without the query string.
    pub fn path_only(&self) -> &str {
        self.split_query().0
    }

    /// Query string without the leading `?`, if any.
    pub fn query(&self) -> Option<&str> {
        self.split_query().1
    }

    fn split_query(&self) -> (&str, Option<&str>) {
        match self.path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (self.path.as_str(), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_query() {
        let req = RequestContext::new("GET", "/a/b?x=1&y=2");
        assert_eq!(req.path_only(), "/a/b");
        assert_eq!(req.query(), Some("x=1&y=2"));

        let req = RequestContext::new("GET", "/a/b/");
        assert_eq!(req.path_only(), "/a/b/");
        assert_eq!(req.query(), None);
    }

    #[test]
    fn test_origin_display() {
        let req = RequestContext::new("GET", "/").with_origin("https", "example.com");
        assert_eq!(req.origin.to_string(), "https://example.com");
        assert_eq!(Origin::default().to_string(), "http://localhost");
    }
}
