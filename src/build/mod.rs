//! The staged build pipeline.
//!
//! Output is never written directly to the destination: everything is staged
//! inside the [`BuildContext`] and promoted once rendering has succeeded, so
//! partial builds stay invisible to consumers of the destination path. The
//! remove-then-move promote is best-effort, not atomic; the underlying
//! filesystem may not offer true atomic directory replacement.

mod archive;
mod context;

pub use archive::compress_dir;
pub use context::{BuildContext, DATA_SUBDIR, TEMPLATE_SUBDIR};

use std::io::Write as _;
use std::path::Path;

use crate::config::{OutputTarget, RunConfig};
use crate::error::{LogweaveError, Result};

/// Verify the destination paths are writable before touching them.
///
/// # Errors
/// Returns `Conflict` for a pre-existing report file or data directory when
/// overwrite is not authorized. Nothing is mutated on failure.
pub fn preflight(config: &RunConfig) -> Result<()> {
    if config.force {
        return Ok(());
    }

    if let OutputTarget::File(path) = &config.output
        && path.exists()
    {
        return Err(LogweaveError::Conflict { path: path.clone() });
    }

    if let Some(data) = &config.data
        && data.dir.exists()
    {
        return Err(LogweaveError::Conflict {
            path: data.dir.clone(),
        });
    }

    Ok(())
}

/// Promote the rendered report bytes to their destination.
///
/// Stdout mode bypasses filesystem promotion entirely. In file mode an
/// authorized pre-existing report is deleted first and parent directories
/// are created as needed.
///
/// # Errors
/// Returns a `Promote` error naming the destination path on any I/O failure.
pub fn promote_report(config: &RunConfig, rendered: &[u8]) -> Result<()> {
    let path = match &config.output {
        OutputTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered)?;
            return Ok(());
        }
        OutputTarget::File(path) => path,
    };

    let promote_err = |source| LogweaveError::Promote {
        path: path.clone(),
        source,
    };

    if path.exists() && config.force {
        std::fs::remove_file(path).map_err(promote_err)?;
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(promote_err)?;
    }
    std::fs::write(path, rendered).map_err(promote_err)?;
    Ok(())
}

/// Move the staged data directory into its final place.
///
/// Ownership transfers: this is a move, not a copy. An authorized
/// pre-existing destination is removed first. Falls back to copy-and-remove
/// when a plain rename crosses filesystems.
///
/// # Errors
/// Returns a `Promote` error naming the destination on any I/O failure.
pub fn promote_data(staged: &Path, dest: &Path, force: bool) -> Result<()> {
    let promote_err = |source| LogweaveError::Promote {
        path: dest.to_path_buf(),
        source,
    };

    if dest.exists() && force {
        std::fs::remove_dir_all(dest).map_err(promote_err)?;
    }
    if let Some(parent) = dest.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(promote_err)?;
    }

    if std::fs::rename(staged, dest).is_err() {
        copy_dir_recursive(staged, dest).map_err(promote_err)?;
        std::fs::remove_dir_all(staged).map_err(promote_err)?;
    }
    Ok(())
}

/// Copy a template's declared extra files from the assembled tree to sit
/// alongside the promoted report.
///
/// # Errors
/// Returns a `Promote` error if a declared file cannot be copied.
pub fn copy_alongside(template_dir: &Path, names: &[&str], report_path: &Path) -> Result<()> {
    let Some(dest_dir) = report_path.parent() else {
        return Ok(());
    };

    for name in names {
        let src = template_dir.join(name);
        let dest = dest_dir.join(name);
        let promote_err = |source| LogweaveError::Promote {
            path: dest.clone(),
            source,
        };
        if src.is_dir() {
            copy_dir_recursive(&src, &dest).map_err(promote_err)?;
        } else {
            std::fs::copy(&src, &dest).map_err(promote_err)?;
        }
    }
    Ok(())
}

fn copy_dir_recursive(from: &Path, to: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(to)?;
    for entry in walkdir::WalkDir::new(from) {
        let entry = entry.map_err(|e| {
            e.into_io_error()
                .unwrap_or_else(|| std::io::Error::other("walk failed"))
        })?;
        let rel = entry
            .path()
            .strip_prefix(from)
            .map_err(std::io::Error::other)?;
        if rel.as_os_str().is_empty() {
            continue;
        }
        let dest = to.join(rel);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest)?;
        } else {
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), &dest)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
