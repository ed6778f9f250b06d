use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::SampleNameCleaner;
use crate::module::{MetricValue, ModuleResult};

/// Identity of one general-statistics column.
///
/// Columns are module-qualified: two modules reporting a metric with the
/// same name contribute two columns, never a merged one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnId {
    pub module: String,
    pub metric: String,
}

impl ColumnId {
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}:{}", self.module, self.metric)
    }
}

/// The cross-module per-sample summary table.
///
/// Row order is first-seen sample order across modules in run order; column
/// order is module run order, then metric first-seen order within a module.
/// Both orders are reproducible for identical inputs.
#[derive(Debug, Clone, Default)]
pub struct GeneralStatsTable {
    pub columns: Vec<ColumnId>,
    /// sample -> column key -> value.
    pub rows: IndexMap<String, IndexMap<String, MetricValue>>,
}

impl GeneralStatsTable {
    fn merge_module(
        &mut self,
        module_id: &str,
        stats: &IndexMap<String, IndexMap<String, MetricValue>>,
        cleaner: &SampleNameCleaner,
    ) {
        for (raw_sample, metrics) in stats {
            let sample = cleaner.clean(raw_sample);
            let row = self.rows.entry(sample).or_default();
            for (metric, value) in metrics {
                let column = ColumnId {
                    module: module_id.to_string(),
                    metric: metric.clone(),
                };
                if !self.columns.contains(&column) {
                    self.columns.push(column.clone());
                }
                row.insert(column.key(), value.clone());
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.rows.len()
    }
}

/// Per-sample record of which files, from which module, contributed data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSourcesIndex {
    /// sample -> module id -> contributing files.
    pub samples: IndexMap<String, IndexMap<String, Vec<PathBuf>>>,
}

impl DataSourcesIndex {
    fn merge_module(
        &mut self,
        module_id: &str,
        sources: &IndexMap<String, Vec<PathBuf>>,
        cleaner: &SampleNameCleaner,
    ) {
        for (raw_sample, files) in sources {
            let sample = cleaner.clean(raw_sample);
            self.samples
                .entry(sample)
                .or_default()
                .entry(module_id.to_string())
                .or_default()
                .extend(files.iter().cloned());
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// The accumulated state across all modules for one run.
///
/// Built incrementally by the orchestrator loop; read-only after the loop
/// finishes.
#[derive(Debug, Default)]
pub struct AggregateReport {
    pub run_id: String,
    pub title: String,
    /// Per-module results in run order, for module-grouped report sections.
    pub modules: Vec<(String, ModuleResult)>,
    pub general_stats: GeneralStatsTable,
    pub data_sources: DataSourcesIndex,
    pub failed_modules: Vec<String>,
}

impl AggregateReport {
    #[must_use]
    pub fn new(run_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Fold one module's results into the aggregate.
    pub fn record(&mut self, module_id: &str, result: ModuleResult, cleaner: &SampleNameCleaner) {
        self.general_stats
            .merge_module(module_id, &result.general_stats, cleaner);
        self.data_sources
            .merge_module(module_id, &result.data_sources, cleaner);
        self.modules.push((module_id.to_string(), result));
    }

    pub fn record_failure(&mut self, module_id: &str) {
        self.failed_modules.push(module_id.to_string());
    }

    /// Whether any module contributed anything worth reporting.
    #[must_use]
    pub fn has_results(&self) -> bool {
        self.modules.iter().any(|(_, r)| !r.is_empty())
    }

    #[must_use]
    pub fn any_failed(&self) -> bool {
        !self.failed_modules.is_empty()
    }
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
