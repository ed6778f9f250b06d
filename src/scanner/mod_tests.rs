use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use super::*;
use crate::config::{OutputTarget, RunConfig, SamplesConfig};

fn run_config(roots: Vec<PathBuf>) -> RunConfig {
    RunConfig {
        roots,
        file_list: None,
        ignore: Vec::new(),
        max_filesize: crate::config::DEFAULT_MAX_FILESIZE,
        include_modules: Vec::new(),
        exclude_modules: Vec::new(),
        output: OutputTarget::File(PathBuf::from("logweave_report.html")),
        force: false,
        data: None,
        template: "default".to_string(),
        title: "Test".to_string(),
        samples: SamplesConfig::default(),
        run_id: "test-run".to_string(),
    }
}

#[test]
fn discover_yields_sorted_files_within_a_root() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("b.log"), "b").unwrap();
    fs::write(dir.path().join("a.log"), "a").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/c.log"), "c").unwrap();

    let config = run_config(vec![dir.path().to_path_buf()]);
    let files = discover(&config).unwrap();

    let names: Vec<_> = files.iter().map(CandidateFile::file_name).collect();
    assert_eq!(names, vec!["a.log", "b.log", "c.log"]);
}

#[test]
fn discover_applies_ignore_globs() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("keep.log"), "x").unwrap();
    fs::write(dir.path().join("drop.tmp"), "x").unwrap();

    let mut config = run_config(vec![dir.path().to_path_buf()]);
    config.ignore = vec!["*.tmp".to_string()];
    let files = discover(&config).unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].file_name(), "keep.log");
}

#[test]
fn discover_skips_oversized_files() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("small.log"), "tiny").unwrap();
    fs::write(dir.path().join("big.log"), "x".repeat(128)).unwrap();

    let mut config = run_config(vec![dir.path().to_path_buf()]);
    config.max_filesize = 16;
    let files = discover(&config).unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].file_name(), "small.log");
}

#[test]
fn discover_dedups_overlapping_roots() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/one.log"), "1").unwrap();

    let config = run_config(vec![
        dir.path().to_path_buf(),
        dir.path().join("sub"),
    ]);
    let files = discover(&config).unwrap();

    assert_eq!(files.len(), 1);
    // Kept for the first root that reached it.
    assert_eq!(files[0].root, dunce::canonicalize(dir.path()).unwrap());
}

#[test]
fn discover_reports_missing_root() {
    let config = run_config(vec![PathBuf::from("/definitely/not/here")]);
    let err = discover(&config).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn file_list_mode_reads_paths_and_skips_comments() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.log");
    let b = dir.path().join("b.log");
    fs::write(&a, "a").unwrap();
    fs::write(&b, "b").unwrap();

    let list = dir.path().join("files.txt");
    fs::write(
        &list,
        format!(
            "# samples for tonight's run\n{}\n\n{}\n{}\n",
            a.display(),
            b.display(),
            dir.path().join("missing.log").display()
        ),
    )
    .unwrap();

    let mut config = run_config(Vec::new());
    config.file_list = Some(list);
    let files = discover(&config).unwrap();

    let names: Vec<_> = files.iter().map(CandidateFile::file_name).collect();
    assert_eq!(names, vec!["a.log", "b.log"]);
}

#[test]
fn single_file_root_is_a_candidate() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("lone.log");
    fs::write(&file, "x").unwrap();

    let config = run_config(vec![file]);
    let files = discover(&config).unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].file_name(), "lone.log");
}
