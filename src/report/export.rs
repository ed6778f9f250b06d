use std::fmt::Write as _;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{AggregateReport, ColumnId};
use crate::error::{LogweaveError, Result};
use crate::module::MetricValue;

pub const GENERAL_STATS_JSON: &str = "general_stats.json";
pub const GENERAL_STATS_TSV: &str = "general_stats.tsv";
pub const DATA_SOURCES_JSON: &str = "data_sources.json";
pub const DATA_SOURCES_TSV: &str = "data_sources.tsv";
pub const RUN_INFO_JSON: &str = "run_info.json";

/// Machine-readable export format for the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataFormat {
    #[default]
    Json,
    Tsv,
}

impl std::str::FromStr for DataFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "tsv" => Ok(Self::Tsv),
            _ => Err(format!("Unknown data format: {s}")),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct GeneralStatsExport {
    columns: Vec<ColumnId>,
    samples: IndexMap<String, IndexMap<String, MetricValue>>,
}

#[derive(Serialize)]
struct RunInfo<'a> {
    run_id: &'a str,
    title: &'a str,
    modules: Vec<&'a str>,
    failed_modules: &'a [String],
}

/// Write the serialized aggregate into `dir` (the staged data directory).
///
/// # Errors
/// Returns an error if a file cannot be written or serialized.
pub fn write_export(dir: &Path, report: &AggregateReport, format: DataFormat) -> Result<()> {
    std::fs::create_dir_all(dir)?;

    match format {
        DataFormat::Json => {
            write_general_stats_json(&dir.join(GENERAL_STATS_JSON), report)?;
            let sources = serde_json::to_string_pretty(&report.data_sources)?;
            std::fs::write(dir.join(DATA_SOURCES_JSON), sources)?;
        }
        DataFormat::Tsv => {
            std::fs::write(
                dir.join(GENERAL_STATS_TSV),
                general_stats_tsv(report),
            )?;
            std::fs::write(dir.join(DATA_SOURCES_TSV), data_sources_tsv(report))?;
        }
    }

    let info = RunInfo {
        run_id: &report.run_id,
        title: &report.title,
        modules: report.modules.iter().map(|(id, _)| id.as_str()).collect(),
        failed_modules: &report.failed_modules,
    };
    std::fs::write(
        dir.join(RUN_INFO_JSON),
        serde_json::to_string_pretty(&info)?,
    )?;

    Ok(())
}

fn write_general_stats_json(path: &Path, report: &AggregateReport) -> Result<()> {
    let export = GeneralStatsExport {
        columns: report.general_stats.columns.clone(),
        samples: report.general_stats.rows.clone(),
    };
    std::fs::write(path, serde_json::to_string_pretty(&export)?)?;
    Ok(())
}

/// Re-load an exported general statistics table.
///
/// Round-trips with [`write_export`]: the returned sample -> column-key ->
/// value mapping equals the one that was serialized.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_general_stats(
    path: &Path,
) -> Result<IndexMap<String, IndexMap<String, MetricValue>>> {
    let content = std::fs::read_to_string(path).map_err(|e| LogweaveError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let export: GeneralStatsExport = serde_json::from_str(&content)?;
    Ok(export.samples)
}

fn general_stats_tsv(report: &AggregateReport) -> String {
    let table = &report.general_stats;
    let mut out = String::from("sample");
    for column in &table.columns {
        let _ = write!(out, "\t{}", column.key());
    }
    out.push('\n');

    for (sample, row) in &table.rows {
        out.push_str(sample);
        for column in &table.columns {
            out.push('\t');
            if let Some(value) = row.get(&column.key()) {
                let _ = write!(out, "{value}");
            }
        }
        out.push('\n');
    }
    out
}

fn data_sources_tsv(report: &AggregateReport) -> String {
    let mut out = String::from("sample\tmodule\tsource\n");
    for (sample, modules) in &report.data_sources.samples {
        for (module, files) in modules {
            for file in files {
                let _ = writeln!(out, "{sample}\t{module}\t{}", file.display());
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
