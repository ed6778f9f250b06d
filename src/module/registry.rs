use indexmap::IndexMap;

use super::{Extractor, FlatKvModule, LogStatsModule};
use crate::error::{LogweaveError, Result};

pub type ExtractorFactory = Box<dyn Fn() -> Box<dyn Extractor> + Send + Sync>;

/// Maps module identifiers to lazily-instantiated extractors.
///
/// Insertion order is the run order; `resolve` only ever filters it.
pub struct ModuleRegistry {
    factories: IndexMap<&'static str, ExtractorFactory>,
}

impl ModuleRegistry {
    /// An empty registry. Embedders register their own extractors.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: IndexMap::new(),
        }
    }

    /// The registry with the built-in generic modules, in their fixed order.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("flat_kv", Box::new(|| Box::new(FlatKvModule)));
        registry.register("log_stats", Box::new(|| Box::new(LogStatsModule)));
        registry
    }

    /// Register an extractor factory. A later registration under the same
    /// identifier replaces the earlier one but keeps its position.
    pub fn register(&mut self, id: &'static str, factory: ExtractorFactory) {
        self.factories.insert(id, factory);
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Instantiate the extractor registered under `id`.
    #[must_use]
    pub fn instantiate(&self, id: &str) -> Option<Box<dyn Extractor>> {
        self.factories.get(id).map(|factory| factory())
    }

    /// Resolve the run-set from include/exclude selections.
    ///
    /// Registry order is preserved; an empty include list means "all".
    ///
    /// # Errors
    /// Returns an error for an identifier that names no registered module,
    /// so a typo fails fast instead of silently shrinking the run-set.
    pub fn resolve(&self, include: &[String], exclude: &[String]) -> Result<Vec<&'static str>> {
        for id in include.iter().chain(exclude) {
            if !self.factories.contains_key(id.as_str()) {
                return Err(LogweaveError::UnknownModule(id.clone()));
            }
        }

        Ok(self
            .factories
            .keys()
            .copied()
            .filter(|id| include.is_empty() || include.iter().any(|inc| inc.as_str() == *id))
            .filter(|id| !exclude.iter().any(|exc| exc.as_str() == *id))
            .collect())
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
