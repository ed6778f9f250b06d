use super::{ExtractOutcome, Extractor, MetricValue, ModuleResult};
use crate::error::{LogweaveError, Result};
use crate::scanner::CandidateFile;

/// Generic extractor summarizing plain `.log` files.
///
/// One sample per file (the file stem); reports line and byte counts so a
/// run always has something to show even before tool-specific extractors
/// are registered.
pub struct LogStatsModule;

impl LogStatsModule {
    fn matches(candidate: &CandidateFile) -> bool {
        candidate
            .path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == "log")
    }
}

impl Extractor for LogStatsModule {
    fn id(&self) -> &'static str {
        "log_stats"
    }

    fn name(&self) -> &'static str {
        "Log file overview"
    }

    fn extract(&self, files: &[CandidateFile]) -> Result<ExtractOutcome> {
        let matching: Vec<_> = files.iter().filter(|f| Self::matches(f)).collect();
        if matching.is_empty() {
            return Ok(ExtractOutcome::NoMatchingFiles);
        }

        let mut result = ModuleResult::new();
        for candidate in matching {
            let content =
                std::fs::read_to_string(&candidate.path).map_err(|e| LogweaveError::FileRead {
                    path: candidate.path.clone(),
                    source: e,
                })?;

            let sample = candidate
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unnamed")
                .to_string();

            #[allow(clippy::cast_possible_wrap)]
            let bytes = content.len() as i64;
            #[allow(clippy::cast_possible_wrap)]
            let lines = content.lines().count() as i64;

            result.add_metric(&sample, "lines", MetricValue::Int(lines));
            result.add_metric(&sample, "bytes", MetricValue::Int(bytes));
            result.add_source(&sample, candidate.path.clone());
        }
        Ok(ExtractOutcome::Extracted(result))
    }
}

#[cfg(test)]
#[path = "log_stats_tests.rs"]
mod tests;
