//! Configuration loading and merging.
//!
//! A `FileConfig` is read from `.logweave.toml` (in the first scan root, or
//! an explicit `--config` path), merged with CLI overrides, and frozen into
//! the [`RunConfig`] the core consumes. Nothing past this module mutates
//! configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LogweaveError, Result};

pub const CONFIG_FILENAME: &str = ".logweave.toml";

/// Default cap on candidate file size. Larger files are skipped during
/// discovery so a stray multi-gigabyte artifact cannot stall extraction.
pub const DEFAULT_MAX_FILESIZE: u64 = 50 * 1024 * 1024;

const fn default_max_filesize() -> u64 {
    DEFAULT_MAX_FILESIZE
}

fn default_template() -> String {
    "default".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("logweave_report.html")
}

fn default_strip_suffixes() -> Vec<String> {
    [".log", ".txt", ".tsv", ".json", ".stats"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_true() -> bool {
    true
}

/// Discovery section of the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Glob patterns for files and directories to skip entirely.
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Skip candidate files larger than this many bytes.
    #[serde(default = "default_max_filesize")]
    pub max_filesize: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            ignore: Vec::new(),
            max_filesize: DEFAULT_MAX_FILESIZE,
        }
    }
}

/// Module selection section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModulesConfig {
    /// Run only these modules (registry order is preserved).
    #[serde(default)]
    pub include: Vec<String>,

    /// Never run these modules.
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Report section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportConfig {
    #[serde(default = "default_template")]
    pub template: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            title: None,
            output: default_output(),
        }
    }
}

/// Data export section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DataConfig {
    /// Write the machine-readable data directory alongside the report.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Export format name, parsed by the export layer ("json" or "tsv").
    #[serde(default)]
    pub format: Option<String>,

    /// Archive the data directory as a .tar.gz and remove the plain copy.
    #[serde(default)]
    pub zip: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            format: None,
            zip: false,
        }
    }
}

/// A single pattern replacement applied to raw sample names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SampleReplacement {
    pub pattern: String,
    pub with: String,
}

/// Sample-name cleaning rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SamplesConfig {
    /// Suffixes stripped from raw sample names, longest match first.
    #[serde(default = "default_strip_suffixes")]
    pub strip_suffixes: Vec<String>,

    /// Regex replacements applied after suffix stripping.
    #[serde(default)]
    pub replace: Vec<SampleReplacement>,
}

impl Default for SamplesConfig {
    fn default() -> Self {
        Self {
            strip_suffixes: default_strip_suffixes(),
            replace: Vec::new(),
        }
    }
}

/// On-disk configuration (`.logweave.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileConfig {
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub modules: ModulesConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub samples: SamplesConfig,
}

/// Loads `FileConfig` from disk.
pub struct FileConfigLoader;

impl FileConfigLoader {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Load config from an explicit path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_path(&self, path: &Path) -> Result<FileConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| LogweaveError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Look for `.logweave.toml` in the given root, falling back to defaults.
    ///
    /// # Errors
    /// Returns an error if a config file exists but cannot be parsed.
    pub fn load_from_root(&self, root: &Path) -> Result<FileConfig> {
        let candidate = root.join(CONFIG_FILENAME);
        if candidate.is_file() {
            self.load_from_path(&candidate)
        } else {
            Ok(FileConfig::default())
        }
    }
}

impl Default for FileConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Where the rendered report goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    /// Write the report to standard output; filesystem promotion is skipped.
    Stdout,
}

/// Data export settings, present only when the export is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataExport {
    pub format: crate::report::DataFormat,
    pub zip: bool,
    /// Destination directory for the promoted export.
    pub dir: PathBuf,
}

/// The resolved, immutable per-run configuration.
///
/// Built once by the CLI layer; the orchestrator and build pipeline only
/// ever read it.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub roots: Vec<PathBuf>,
    pub file_list: Option<PathBuf>,
    pub ignore: Vec<String>,
    pub max_filesize: u64,
    pub include_modules: Vec<String>,
    pub exclude_modules: Vec<String>,
    pub output: OutputTarget,
    pub force: bool,
    pub data: Option<DataExport>,
    pub template: String,
    pub title: String,
    pub samples: SamplesConfig,
    /// Stable per-run identifier embedded in the report and the export.
    pub run_id: String,
}

impl RunConfig {
    /// Derive the data directory path for a report destination.
    ///
    /// `report.html` exports next to itself as `report_data/`.
    #[must_use]
    pub fn data_dir_for(report_path: &Path) -> PathBuf {
        let stem = report_path
            .file_stem()
            .map_or_else(|| "logweave_report".to_string(), |s| s.to_string_lossy().into_owned());
        report_path.with_file_name(format!("{stem}_data"))
    }

    #[must_use]
    pub fn new_run_id() -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
