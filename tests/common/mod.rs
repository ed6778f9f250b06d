#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the logweave binary.
#[macro_export]
macro_rules! logweave {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("logweave"))
    };
}

/// Temporary directory tree with analysis-output fixtures.
pub struct TestFixture {
    pub dir: TempDir,
    /// Private TMPDIR so tests can assert the build staging area is gone.
    pub tmp: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
            tmp: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creates a file with the given content, creating parent directories.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Creates a flat key/value stats sheet for the given sample.
    pub fn create_stats(&self, sample: &str, pairs: &[(&str, &str)]) -> PathBuf {
        let mut content = String::new();
        for (key, value) in pairs {
            content.push_str(key);
            content.push('\t');
            content.push_str(value);
            content.push('\n');
        }
        self.create_file(&format!("{sample}_stats.tsv"), &content)
    }

    /// Creates a plain log file for the given sample.
    pub fn create_log(&self, sample: &str, lines: usize) -> PathBuf {
        let mut content = String::new();
        for i in 0..lines {
            content.push_str(&format!("processed chunk {i}\n"));
        }
        self.create_file(&format!("{sample}.log"), &content)
    }

    /// Path where the report lands by default for this fixture.
    pub fn report_path(&self) -> PathBuf {
        self.dir.path().join("report.html")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("report_data")
    }

    /// Entries currently present in the fixture's private TMPDIR.
    pub fn leftover_tmp_entries(&self) -> Vec<PathBuf> {
        fs::read_dir(self.tmp.path())
            .map(|entries| {
                entries
                    .filter_map(std::result::Result::ok)
                    .map(|e| e.path())
                    .collect()
            })
            .unwrap_or_default()
    }
}
