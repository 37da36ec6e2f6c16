//! Saving a rendering to disk

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Result, TreeError};

/// Name of the file written into the destination directory.
pub const OUTPUT_FILE_NAME: &str = "tree_structure.txt";

/// Write `content` to `OUTPUT_FILE_NAME` inside `dir`, replacing any previous
/// file. The content is staged in a temporary file in the same directory and
/// then renamed into place, so the target holds either the old content or the
/// complete new content.
pub fn save_rendering(dir: &Path, content: &str) -> Result<PathBuf> {
    let target = dir.join(OUTPUT_FILE_NAME);
    let write_error = |source: std::io::Error| TreeError::Write {
        path: target.clone(),
        source,
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(write_error)?;
    staged.write_all(content.as_bytes()).map_err(write_error)?;
    staged.as_file().sync_all().map_err(write_error)?;
    staged.persist(&target).map_err(|e| write_error(e.error))?;

    tracing::info!("saved tree to '{}'", target.display());
    Ok(target)
}
