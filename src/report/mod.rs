//! Aggregation of module results and the extraction orchestrator.

mod aggregate;
mod export;
mod orchestrator;
mod progress;
mod samples;

pub use aggregate::{AggregateReport, ColumnId, DataSourcesIndex, GeneralStatsTable};
pub use export::{
    DATA_SOURCES_JSON, DATA_SOURCES_TSV, DataFormat, GENERAL_STATS_JSON, GENERAL_STATS_TSV,
    RUN_INFO_JSON, load_general_stats, write_export,
};
pub use orchestrator::run_modules;
pub use progress::ModuleProgress;
pub use samples::SampleNameCleaner;
