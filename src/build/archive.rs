use std::fs::File;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::error::{LogweaveError, Result};

/// Archive a promoted data directory as `<dir>.tar.gz` and remove the
/// uncompressed copy.
///
/// # Errors
/// Returns an error if the archive cannot be written or the directory
/// cannot be removed afterwards.
pub fn compress_dir(dir: &Path) -> Result<PathBuf> {
    let name = dir
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LogweaveError::Config(format!("Unarchivable path: {}", dir.display())))?;
    let archive_path = dir.with_file_name(format!("{name}.tar.gz"));

    let file = File::create(&archive_path).map_err(|e| LogweaveError::Promote {
        path: archive_path.clone(),
        source: e,
    })?;
    let gz = GzEncoder::new(file, Compression::default());
    let mut tar = tar::Builder::new(gz);
    tar.append_dir_all(name, dir)?;
    tar.into_inner()?.finish()?;

    std::fs::remove_dir_all(dir)?;
    Ok(archive_path)
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;
