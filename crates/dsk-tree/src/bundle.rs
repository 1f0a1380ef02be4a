//! Asset bundling.
//!
//! Components keep their styles and scripts as plain files next to their
//! `index.json`, with no naming convention. Bundling concatenates every file
//! with a given extension so the stage can embed them as a single resource.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::error::{Result, TreeError};

/// List files directly in `dir` matching `*.<extension>`, in glob match order.
///
/// Subdirectories are not searched, and directories whose name happens to
/// match the pattern are skipped.
///
/// # Errors
///
/// Returns [`TreeError::InvalidNode`] if `dir` is not valid UTF-8 and
/// [`TreeError::Io`] if the directory cannot be read.
pub fn asset_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let dir_str = dir.to_str().ok_or_else(|| TreeError::InvalidNode {
        path: dir.to_path_buf(),
        reason: "directory path is not valid UTF-8",
    })?;
    let pattern = format!(
        "{}/*.{}",
        Pattern::escape(dir_str),
        Pattern::escape(extension)
    );

    let paths = glob::glob(&pattern).map_err(|e| TreeError::InvalidNode {
        path: dir.to_path_buf(),
        reason: e.msg,
    })?;

    let mut files = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            TreeError::io(path, e.into_error())
        })?;
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

/// Concatenate the raw bytes of all `*.<extension>` files in `dir`.
///
/// No separator is inserted between files.
///
/// # Errors
///
/// Returns [`TreeError::NoAssets`] when nothing matches, so callers can tell
/// "nothing to embed" apart from an existing but empty file.
pub fn bundle(dir: &Path, extension: &str) -> Result<Vec<u8>> {
    let files = asset_files(dir, extension)?;
    if files.is_empty() {
        return Err(TreeError::NoAssets {
            extension: extension.to_owned(),
            path: dir.to_path_buf(),
        });
    }

    let mut buf = Vec::new();
    for file in &files {
        let content = fs::read(file).map_err(|e| TreeError::io(file, e))?;
        buf.extend_from_slice(&content);
    }

    tracing::debug!(
        dir = %dir.display(),
        extension,
        files = files.len(),
        bytes = buf.len(),
        "Bundled assets"
    );
    Ok(buf)
}
