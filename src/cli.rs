use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::report::DataFormat;

#[derive(Parser, Debug)]
#[command(name = "logweave")]
#[command(author, version, about = "Aggregate analysis-tool logs into a single report")]
#[command(long_about = "Searches the given directories for analysis-tool output, runs every \
    matching extraction module, and weaves the results into one HTML report.\n\n\
    Exit codes:\n  \
    0 - Report produced, all modules succeeded\n  \
    1 - Report produced, but one or more modules failed\n  \
    2 - Configuration or runtime error, no report produced\n  \
    3 - No analysis results found, no report produced\n  \
    130 - Interrupted")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for analysis results and build the report
    Run(RunArgs),

    /// List the registered extraction modules
    Modules,

    /// List the registered report templates
    Templates,
}

#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunArgs {
    /// Directories (or single files) to search for analysis results
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Read candidate file paths from a file instead of walking directories
    #[arg(long)]
    pub file_list: Option<PathBuf>,

    /// Run only these modules (can be specified multiple times)
    #[arg(short = 'm', long = "module")]
    pub modules: Vec<String>,

    /// Never run these modules (can be specified multiple times)
    #[arg(short = 'e', long = "exclude-module")]
    pub exclude_modules: Vec<String>,

    /// Ignore files/directories matching this glob (can be specified multiple times)
    #[arg(short = 'x', long)]
    pub ignore: Vec<String>,

    /// Report output path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the report to standard output instead of a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    /// Overwrite an existing report and data directory
    #[arg(short, long)]
    pub force: bool,

    /// Write the machine-readable data directory alongside the report
    #[arg(long)]
    pub data_dir: bool,

    /// Skip the machine-readable data directory
    #[arg(long, conflicts_with = "data_dir")]
    pub no_data_dir: bool,

    /// Data export format [possible values: json, tsv]
    #[arg(long)]
    pub data_format: Option<DataFormat>,

    /// Archive the data directory as .tar.gz and remove the plain copy
    #[arg(long)]
    pub zip_data: bool,

    /// Report template
    #[arg(short = 't', long)]
    pub template: Option<String>,

    /// Extra suffix to strip from sample names (can be specified multiple times)
    #[arg(long = "strip-suffix")]
    pub strip_suffixes: Vec<String>,

    /// Report title
    #[arg(long)]
    pub title: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip loading configuration file
    #[arg(long)]
    pub no_config: bool,

    /// Skip candidate files larger than this many bytes
    #[arg(long)]
    pub max_filesize: Option<u64>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
