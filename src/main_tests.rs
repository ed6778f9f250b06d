use std::path::PathBuf;

use super::*;

fn run_args(argv: &[&str]) -> RunArgs {
    let mut full = vec!["logweave", "run"];
    full.extend_from_slice(argv);
    let cli = Cli::parse_from(full);
    match cli.command {
        Commands::Run(args) => args,
        _ => panic!("expected run command"),
    }
}

#[test]
fn default_output_gets_a_sibling_data_dir() {
    let config = build_run_config(&run_args(&[]), FileConfig::default()).unwrap();

    assert_eq!(
        config.output,
        OutputTarget::File(PathBuf::from("logweave_report.html"))
    );
    let data = config.data.expect("data export on by default");
    assert_eq!(data.dir, PathBuf::from("logweave_report_data"));
    assert_eq!(data.format, DataFormat::Json);
    assert!(!data.zip);
}

#[test]
fn stdout_mode_disables_the_data_export() {
    let config = build_run_config(&run_args(&["--stdout"]), FileConfig::default()).unwrap();
    assert_eq!(config.output, OutputTarget::Stdout);
    assert!(config.data.is_none());
}

#[test]
fn no_data_dir_flag_disables_the_export() {
    let config = build_run_config(&run_args(&["--no-data-dir"]), FileConfig::default()).unwrap();
    assert!(config.data.is_none());
}

#[test]
fn cli_ignore_patterns_extend_file_config() {
    let mut file = FileConfig::default();
    file.discovery.ignore = vec!["*.bak".to_string()];

    let config = build_run_config(&run_args(&["-x", "*.tmp"]), file).unwrap();
    assert_eq!(config.ignore, vec!["*.bak", "*.tmp"]);
}

#[test]
fn cli_module_selection_replaces_file_include_list() {
    let mut file = FileConfig::default();
    file.modules.include = vec!["log_stats".to_string()];

    let from_file = build_run_config(&run_args(&[]), file.clone()).unwrap();
    assert_eq!(from_file.include_modules, vec!["log_stats"]);

    let from_cli = build_run_config(&run_args(&["-m", "flat_kv"]), file).unwrap();
    assert_eq!(from_cli.include_modules, vec!["flat_kv"]);
}

#[test]
fn data_format_from_file_config_is_parsed() {
    let mut file = FileConfig::default();
    file.data.format = Some("tsv".to_string());

    let config = build_run_config(&run_args(&[]), file).unwrap();
    assert_eq!(config.data.unwrap().format, DataFormat::Tsv);
}

#[test]
fn bad_data_format_in_file_config_is_a_config_error() {
    let mut file = FileConfig::default();
    file.data.format = Some("parquet".to_string());

    let err = build_run_config(&run_args(&[]), file).unwrap_err();
    assert!(err.to_string().contains("parquet"));
}

#[test]
fn title_falls_back_from_cli_to_file_to_default() {
    let mut file = FileConfig::default();
    file.report.title = Some("Weekly QC".to_string());

    let from_file = build_run_config(&run_args(&[]), file.clone()).unwrap();
    assert_eq!(from_file.title, "Weekly QC");

    let from_cli = build_run_config(&run_args(&["--title", "Tonight"]), file).unwrap();
    assert_eq!(from_cli.title, "Tonight");

    let fallback = build_run_config(&run_args(&[]), FileConfig::default()).unwrap();
    assert_eq!(fallback.title, "Analysis Report");
}

#[test]
fn strip_suffixes_from_cli_extend_the_defaults() {
    let config =
        build_run_config(&run_args(&["--strip-suffix", ".sorted"]), FileConfig::default())
            .unwrap();
    assert!(config.samples.strip_suffixes.contains(&".log".to_string()));
    assert!(
        config
            .samples
            .strip_suffixes
            .contains(&".sorted".to_string())
    );
}

#[test]
fn each_run_gets_a_fresh_run_id() {
    let first = build_run_config(&run_args(&[]), FileConfig::default()).unwrap();
    let second = build_run_config(&run_args(&[]), FileConfig::default()).unwrap();
    assert_ne!(first.run_id, second.run_id);
    assert!(!first.run_id.is_empty());
}
