use std::io::{BufRead, BufReader};

use super::{ExtractOutcome, Extractor, MetricValue, ModuleResult};
use crate::error::{LogweaveError, Result};
use crate::scanner::CandidateFile;

/// Generic extractor for flat key/value stat sheets.
///
/// Picks up `<sample>_stats.tsv` and `<sample>.stats` files, one sample per
/// file, each line a `key<TAB>value` pair. Lines starting with `#` and lines
/// without a tab are skipped.
pub struct FlatKvModule;

impl FlatKvModule {
    fn matches(candidate: &CandidateFile) -> bool {
        let name = candidate.file_name();
        name.ends_with("_stats.tsv") || name.ends_with(".stats")
    }

    fn sample_name(candidate: &CandidateFile) -> String {
        let name = candidate.file_name();
        name.strip_suffix("_stats.tsv")
            .or_else(|| name.strip_suffix(".stats"))
            .unwrap_or(name)
            .to_string()
    }

    fn parse_file(candidate: &CandidateFile, result: &mut ModuleResult) -> Result<()> {
        let sample = Self::sample_name(candidate);
        let file = std::fs::File::open(&candidate.path).map_err(|e| LogweaveError::FileRead {
            path: candidate.path.clone(),
            source: e,
        })?;

        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| LogweaveError::FileRead {
                path: candidate.path.clone(),
                source: e,
            })?;
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('\t') else {
                tracing::debug!(
                    path = %candidate.path.display(),
                    line = %line,
                    "skipping line without a tab separator"
                );
                continue;
            };
            result.add_metric(&sample, key.trim(), MetricValue::parse(value));
        }

        result.add_source(&sample, candidate.path.clone());
        Ok(())
    }
}

impl Extractor for FlatKvModule {
    fn id(&self) -> &'static str {
        "flat_kv"
    }

    fn name(&self) -> &'static str {
        "Flat key/value stats"
    }

    fn extract(&self, files: &[CandidateFile]) -> Result<ExtractOutcome> {
        let matching: Vec<_> = files.iter().filter(|f| Self::matches(f)).collect();
        if matching.is_empty() {
            return Ok(ExtractOutcome::NoMatchingFiles);
        }

        let mut result = ModuleResult::new();
        for candidate in matching {
            Self::parse_file(candidate, &mut result)?;
        }
        Ok(ExtractOutcome::Extracted(result))
    }
}

#[cfg(test)]
#[path = "flat_kv_tests.rs"]
mod tests;
