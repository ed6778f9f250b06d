use std::path::{Component, Path, PathBuf};

use tempfile::TempDir;

use crate::error::{LogweaveError, Result};

pub const TEMPLATE_SUBDIR: &str = "template";
pub const DATA_SUBDIR: &str = "data";

/// The scoped temporary working area for one build.
///
/// Holds the assembled template tree, module-staged assets, and (when the
/// export is enabled) the staged data directory. Removal is unconditional:
/// the backing `TempDir` cleans up on drop, whichever way the run exits.
pub struct BuildContext {
    tmp: TempDir,
    with_data: bool,
}

impl BuildContext {
    /// Create the staging area.
    ///
    /// # Errors
    /// Returns an error if the temporary directory cannot be created.
    pub fn create(with_data: bool) -> Result<Self> {
        let tmp = TempDir::with_prefix("logweave_")?;
        std::fs::create_dir(tmp.path().join(TEMPLATE_SUBDIR))?;
        if with_data {
            std::fs::create_dir(tmp.path().join(DATA_SUBDIR))?;
        }
        Ok(Self { tmp, with_data })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.tmp.path()
    }

    #[must_use]
    pub fn template_dir(&self) -> PathBuf {
        self.tmp.path().join(TEMPLATE_SUBDIR)
    }

    /// The staged data directory, present only when the export is enabled.
    #[must_use]
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.with_data.then(|| self.tmp.path().join(DATA_SUBDIR))
    }

    /// Write an embedded template file at a template-relative path.
    ///
    /// # Errors
    /// Returns an error for an escaping path or a failed write.
    pub fn write_template_file(&self, rel: &str, contents: &str) -> Result<()> {
        let dest = safe_join(&self.template_dir(), rel)?;
        ensure_parent(&dest)?;
        std::fs::write(dest, contents)?;
        Ok(())
    }

    /// Copy a module-declared asset to its destination-relative path inside
    /// the template tree, creating intermediate directories as needed.
    ///
    /// # Errors
    /// Returns an error for an escaping destination or an unreadable source.
    pub fn stage_asset(&self, dest_rel: &str, src: &Path) -> Result<()> {
        let dest = safe_join(&self.template_dir(), dest_rel)?;
        ensure_parent(&dest)?;
        std::fs::copy(src, &dest).map_err(|e| LogweaveError::FileRead {
            path: src.to_path_buf(),
            source: e,
        })?;
        Ok(())
    }

    /// Explicitly remove the staging area, surfacing cleanup errors.
    ///
    /// Drop covers every other exit path silently.
    ///
    /// # Errors
    /// Returns an error if removal fails.
    pub fn close(self) -> Result<()> {
        self.tmp.close()?;
        Ok(())
    }
}

/// Join a relative path under `base`, rejecting absolute paths and `..`
/// components so a module cannot write outside the staging area.
fn safe_join(base: &Path, rel: &str) -> Result<PathBuf> {
    let rel_path = Path::new(rel);
    let escapes = rel_path.is_absolute()
        || rel_path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)));
    if escapes {
        return Err(LogweaveError::Config(format!(
            "Asset destination escapes the build directory: {rel}"
        )));
    }
    Ok(base.join(rel_path))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
