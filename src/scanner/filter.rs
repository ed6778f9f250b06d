use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{LogweaveError, Result};

pub trait FileFilter {
    fn should_include(&self, path: &Path) -> bool;
}

/// Glob-based candidate filter: optional include set plus ignore patterns.
///
/// An empty include set admits every path; ignore patterns always win.
#[derive(Debug)]
pub struct GlobFilter {
    include: Option<GlobSet>,
    ignore: GlobSet,
}

impl GlobFilter {
    /// Create a new filter from include and ignore glob patterns.
    ///
    /// # Errors
    /// Returns an error if any pattern is invalid.
    pub fn new(include_patterns: &[String], ignore_patterns: &[String]) -> Result<Self> {
        let include = if include_patterns.is_empty() {
            None
        } else {
            Some(Self::build_set(include_patterns)?)
        };
        let ignore = Self::build_set(ignore_patterns)?;

        Ok(Self { include, ignore })
    }

    fn build_set(patterns: &[String]) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| LogweaveError::InvalidPattern {
                pattern: pattern.clone(),
                source: e,
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| LogweaveError::InvalidPattern {
            pattern: "combined patterns".to_string(),
            source: e,
        })
    }

    fn is_included(&self, path: &Path) -> bool {
        self.include.as_ref().is_none_or(|set| set.is_match(path))
    }

    fn is_ignored(&self, path: &Path) -> bool {
        self.ignore.is_match(path)
            || path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| self.ignore.is_match(n))
    }
}

impl FileFilter for GlobFilter {
    fn should_include(&self, path: &Path) -> bool {
        self.is_included(path) && !self.is_ignored(path)
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
