//! Module registry and the extraction capability contract.

mod flat_kv;
mod log_stats;
mod registry;
mod result;

pub use flat_kv::FlatKvModule;
pub use log_stats::LogStatsModule;
pub use registry::{ExtractorFactory, ModuleRegistry};
pub use result::{AssetMap, ExtractOutcome, MetricValue, ModuleResult};

use crate::error::Result;
use crate::scanner::CandidateFile;

/// The capability a pluggable extraction routine implements.
///
/// An implementation inspects the candidate files, parses the ones it
/// recognizes, and either returns its per-sample results or signals that
/// nothing in the set was its to parse. Errors and panics are contained by
/// the orchestrator; a broken module cannot take the run down with it.
pub trait Extractor {
    /// Stable registry identifier.
    fn id(&self) -> &'static str;

    /// Human-readable name for diagnostics and the report.
    fn name(&self) -> &'static str;

    /// Run the extraction over the discovered candidate files.
    ///
    /// # Errors
    /// Returns an error when the module recognized its input but failed to
    /// parse it; the orchestrator records this as a module failure.
    fn extract(&self, files: &[CandidateFile]) -> Result<ExtractOutcome>;
}
