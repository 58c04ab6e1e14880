//! Per-language, insertion-ordered route storage.

use crate::definition::RouteDefinition;
use crate::pattern::CompiledPattern;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

/// Compiled patterns of one route name, keyed by language.
pub type PatternsByLanguage = BTreeMap<String, CompiledPattern>;

/// Routes grouped by language.
///
/// Insertion order within a language is the matching order. Named routes are
/// also indexed by `(language, name)`; re-registering a name for the same
/// language replaces the index entry (last registration wins) while the older
/// definition keeps its place in the ordered sequence.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    by_language: HashMap<String, Vec<Arc<RouteDefinition>>>,
    by_name: HashMap<String, HashMap<String, Arc<RouteDefinition>>>,
    languages: BTreeSet<String>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a definition and record its language.
    pub fn add(&mut self, definition: RouteDefinition) -> Arc<RouteDefinition> {
        let definition = Arc::new(definition);
        let language = definition.language().to_string();

        self.by_language
            .entry(language.clone())
            .or_default()
            .push(Arc::clone(&definition));

        if let Some(name) = definition.name() {
            let replaced = self
                .by_name
                .entry(language.clone())
                .or_default()
                .insert(name.to_string(), Arc::clone(&definition));
            if replaced.is_some() {
                tracing::warn!(
                    route = %name,
                    language = %language,
                    "Route name registered twice, the latest registration wins"
                );
            }
        }

        self.languages.insert(language);
        definition
    }

    /// Routes of `language` in declaration order.
    pub fn routes(&self, language: &str) -> &[Arc<RouteDefinition>] {
        self.by_language
            .get(language)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn named(&self, language: &str, name: &str) -> Option<&Arc<RouteDefinition>> {
        self.by_name.get(language)?.get(name)
    }

    /// Pattern of `name` in every known language that declares it.
    pub fn patterns_for(&self, name: &str) -> PatternsByLanguage {
        self.languages
            .iter()
            .filter_map(|language| {
                self.named(language, name)
                    .map(|def| (language.clone(), def.pattern().clone()))
            })
            .collect()
    }

    pub fn knows_language(&self, language: &str) -> bool {
        self.languages.contains(language)
    }

    /// Known languages, sorted.
    pub fn languages(&self) -> impl Iterator<Item = &str> + '_ {
        self.languages.iter().map(String::as_str)
    }

    /// Every definition, grouped by sorted language, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<RouteDefinition>> + '_ {
        self.languages
            .iter()
            .flat_map(move |language| self.routes(language).iter())
    }

    pub fn len(&self) -> usize {
        self.by_language.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
