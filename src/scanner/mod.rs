//! File discovery.
//!
//! Walks the configured root directories (or reads an explicit file list),
//! applies the glob filter and size cap, and yields the candidate files every
//! extraction module inspects. Gitignore rules are deliberately not consulted:
//! analysis outputs routinely live in ignored directories.

mod filter;

pub use filter::{FileFilter, GlobFilter};

use std::collections::HashSet;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use rayon::prelude::*;

use crate::config::RunConfig;
use crate::error::{LogweaveError, Result};

/// A file discovered under one of the configured roots.
///
/// Modules receive these as read-only views; no ownership transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub path: PathBuf,
    /// The logical root the file was found under.
    pub root: PathBuf,
}

impl CandidateFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, root: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            root: root.into(),
        }
    }

    /// File name as UTF-8, empty for pathological paths.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path.file_name().and_then(|n| n.to_str()).unwrap_or("")
    }
}

/// Discover candidate files for the run.
///
/// Roots contribute in configured order; within a root the listing is sorted,
/// so the same tree always yields the same candidate sequence. A path
/// reachable from two roots is kept for the first root only.
///
/// # Errors
/// Returns an error on invalid glob patterns, an unreadable file list, or an
/// unreadable root.
pub fn discover(config: &RunConfig) -> Result<Vec<CandidateFile>> {
    let filter = GlobFilter::new(&[], &config.ignore)?;

    let mut candidates = if let Some(list_path) = &config.file_list {
        read_file_list(list_path, &filter)?
    } else {
        scan_roots(&config.roots, &filter)?
    };

    dedup_candidates(&mut candidates);
    candidates.retain(|c| within_size_limit(&c.path, config.max_filesize));
    Ok(candidates)
}

fn scan_roots(roots: &[PathBuf], filter: &GlobFilter) -> Result<Vec<CandidateFile>> {
    let per_root: Vec<Result<Vec<CandidateFile>>> = roots
        .par_iter()
        .map(|root| scan_root(root, filter))
        .collect();

    let mut all = Vec::new();
    for result in per_root {
        all.extend(result?);
    }
    Ok(all)
}

fn scan_root(root: &Path, filter: &GlobFilter) -> Result<Vec<CandidateFile>> {
    if !root.exists() {
        return Err(LogweaveError::Config(format!(
            "Search path does not exist: {}",
            root.display()
        )));
    }

    let root = dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());

    if root.is_file() {
        if filter.should_include(&root) {
            let parent = root.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            return Ok(vec![CandidateFile::new(root, parent)]);
        }
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = WalkBuilder::new(&root)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .require_git(false)
        .hidden(false)
        .parents(false)
        .build()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
        .filter(|e| filter.should_include(e.path()))
        .map(ignore::DirEntry::into_path)
        .collect();

    files.sort();

    Ok(files
        .into_iter()
        .map(|path| CandidateFile::new(path, root.clone()))
        .collect())
}

/// Read an explicit file list: one path per line, `#` comments and blank
/// lines skipped. Missing entries are dropped with a warning rather than
/// aborting the run.
fn read_file_list(list_path: &Path, filter: &GlobFilter) -> Result<Vec<CandidateFile>> {
    let file = std::fs::File::open(list_path).map_err(|e| LogweaveError::FileRead {
        path: list_path.to_path_buf(),
        source: e,
    })?;

    let mut candidates = Vec::new();
    for line in std::io::BufReader::new(file).lines() {
        let line = line.map_err(|e| LogweaveError::FileRead {
            path: list_path.to_path_buf(),
            source: e,
        })?;
        let entry = line.trim();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }

        let path = PathBuf::from(entry);
        if !path.is_file() {
            tracing::warn!(path = %path.display(), "file list entry not found, skipping");
            continue;
        }
        if !filter.should_include(&path) {
            continue;
        }

        let root = path.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        candidates.push(CandidateFile::new(path, root));
    }

    Ok(candidates)
}

fn dedup_candidates(candidates: &mut Vec<CandidateFile>) {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    candidates.retain(|c| {
        let key = dunce::canonicalize(&c.path).unwrap_or_else(|_| c.path.clone());
        seen.insert(key)
    });
}

fn within_size_limit(path: &Path, max_filesize: u64) -> bool {
    match std::fs::metadata(path) {
        Ok(meta) if meta.len() > max_filesize => {
            tracing::debug!(
                path = %path.display(),
                size = meta.len(),
                limit = max_filesize,
                "skipping oversized candidate"
            );
            false
        }
        Ok(_) => true,
        // Unreadable metadata: let the module's own read surface the error.
        Err(_) => true,
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
