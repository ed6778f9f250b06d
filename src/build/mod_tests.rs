use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use super::*;
use crate::config::{DataExport, SamplesConfig};
use crate::report::DataFormat;

fn run_config(output: OutputTarget, force: bool, data: Option<DataExport>) -> RunConfig {
    RunConfig {
        roots: vec![PathBuf::from(".")],
        file_list: None,
        ignore: Vec::new(),
        max_filesize: crate::config::DEFAULT_MAX_FILESIZE,
        include_modules: Vec::new(),
        exclude_modules: Vec::new(),
        output,
        force,
        data,
        template: "default".to_string(),
        title: "Test".to_string(),
        samples: SamplesConfig::default(),
        run_id: "test-run".to_string(),
    }
}

#[test]
fn preflight_rejects_existing_report_without_force() {
    let tmp = TempDir::new().unwrap();
    let report = tmp.path().join("report.html");
    fs::write(&report, "old").unwrap();

    let config = run_config(OutputTarget::File(report.clone()), false, None);
    let err = preflight(&config).unwrap_err();
    assert!(matches!(err, LogweaveError::Conflict { .. }));
    // The pre-existing file was not touched.
    assert_eq!(fs::read_to_string(&report).unwrap(), "old");
}

#[test]
fn preflight_rejects_existing_data_dir_without_force() {
    let tmp = TempDir::new().unwrap();
    let data_dir = tmp.path().join("report_data");
    fs::create_dir(&data_dir).unwrap();

    let config = run_config(
        OutputTarget::File(tmp.path().join("report.html")),
        false,
        Some(DataExport {
            format: DataFormat::Json,
            zip: false,
            dir: data_dir,
        }),
    );
    assert!(matches!(
        preflight(&config),
        Err(LogweaveError::Conflict { .. })
    ));
}

#[test]
fn preflight_passes_with_force_or_clean_destination() {
    let tmp = TempDir::new().unwrap();
    let report = tmp.path().join("report.html");

    let clean = run_config(OutputTarget::File(report.clone()), false, None);
    assert!(preflight(&clean).is_ok());

    fs::write(&report, "old").unwrap();
    let forced = run_config(OutputTarget::File(report), true, None);
    assert!(preflight(&forced).is_ok());
}

#[test]
fn promote_report_creates_parent_directories() {
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().join("nested/deep/report.html");

    let config = run_config(OutputTarget::File(dest.clone()), false, None);
    promote_report(&config, b"<html></html>").unwrap();

    assert_eq!(fs::read(&dest).unwrap(), b"<html></html>");
}

#[test]
fn promote_report_replaces_authorized_existing_file() {
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().join("report.html");
    fs::write(&dest, "old").unwrap();

    let config = run_config(OutputTarget::File(dest.clone()), true, None);
    promote_report(&config, b"new").unwrap();

    assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
}

#[test]
fn promote_data_moves_the_staged_directory() {
    let tmp = TempDir::new().unwrap();
    let staged = tmp.path().join("staged");
    fs::create_dir(&staged).unwrap();
    fs::write(staged.join("general_stats.json"), "{}").unwrap();
    let dest = tmp.path().join("final_data");

    promote_data(&staged, &dest, false).unwrap();

    assert!(!staged.exists());
    assert!(dest.join("general_stats.json").is_file());
}

#[test]
fn promote_data_replaces_authorized_existing_directory() {
    let tmp = TempDir::new().unwrap();
    let staged = tmp.path().join("staged");
    fs::create_dir(&staged).unwrap();
    fs::write(staged.join("new.json"), "{}").unwrap();

    let dest = tmp.path().join("final_data");
    fs::create_dir(&dest).unwrap();
    fs::write(dest.join("stale.json"), "{}").unwrap();

    promote_data(&staged, &dest, true).unwrap();

    assert!(dest.join("new.json").is_file());
    assert!(!dest.join("stale.json").exists());
}

#[test]
fn copy_alongside_copies_declared_files_next_to_report() {
    let tmp = TempDir::new().unwrap();
    let template_dir = tmp.path().join("template");
    fs::create_dir_all(template_dir.join("extras")).unwrap();
    fs::write(template_dir.join("README.txt"), "read me").unwrap();
    fs::write(template_dir.join("extras/logo.svg"), "<svg/>").unwrap();

    let out_dir = tmp.path().join("out");
    fs::create_dir(&out_dir).unwrap();
    let report = out_dir.join("report.html");

    copy_alongside(&template_dir, &["README.txt", "extras"], &report).unwrap();

    assert_eq!(
        fs::read_to_string(out_dir.join("README.txt")).unwrap(),
        "read me"
    );
    assert!(out_dir.join("extras/logo.svg").is_file());
}
