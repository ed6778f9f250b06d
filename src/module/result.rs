use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A scalar metric cell in the general statistics table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl MetricValue {
    /// Parse a raw field: integer first, then float, otherwise text.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            return Self::Int(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return Self::Float(f);
        }
        Self::Text(trimmed.to_string())
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Static files a module wants staged into the build, keyed by
/// destination-relative path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetMap {
    pub css: IndexMap<String, PathBuf>,
    pub js: IndexMap<String, PathBuf>,
}

impl AssetMap {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.css.is_empty() && self.js.is_empty()
    }

    /// All declared assets in declaration order, css first.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &PathBuf)> {
        self.css.iter().chain(self.js.iter())
    }
}

/// Everything a single extraction module produced for one run.
///
/// Owned by the orchestrator until handed to the aggregator; never mutated
/// afterward. Sample names are raw here; cleaning happens during aggregation.
#[derive(Debug, Clone, Default)]
pub struct ModuleResult {
    /// sample -> metric -> value, both in insertion order.
    pub general_stats: IndexMap<String, IndexMap<String, MetricValue>>,
    /// sample -> source files that contributed its data.
    pub data_sources: IndexMap<String, Vec<PathBuf>>,
    /// Absent means the module stages no static files (the common case).
    pub assets: Option<AssetMap>,
}

impl ModuleResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_metric(&mut self, sample: &str, metric: &str, value: MetricValue) {
        self.general_stats
            .entry(sample.to_string())
            .or_default()
            .insert(metric.to_string(), value);
    }

    pub fn add_source(&mut self, sample: &str, path: impl Into<PathBuf>) {
        self.data_sources
            .entry(sample.to_string())
            .or_default()
            .push(path.into());
    }

    /// True when the module contributed nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.general_stats.is_empty()
            && self.data_sources.is_empty()
            && self.assets.as_ref().is_none_or(AssetMap::is_empty)
    }
}

/// What a module invocation produced.
#[derive(Debug)]
pub enum ExtractOutcome {
    Extracted(ModuleResult),
    /// Distinguished silent-skip signal: nothing in the candidate set was
    /// this module's to parse. Not a failure, no diagnostic.
    NoMatchingFiles,
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
