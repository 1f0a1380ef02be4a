//! Lexical traversal guard.
//!
//! Every path derived from external input goes through [`validate`] before it
//! is used for filesystem access. The check is purely lexical: paths are
//! normalized without touching the filesystem, so symlinks inside the root are
//! not resolved. The HTTP layer normalizes request paths as well; this is an
//! additional layer, not the only one.

use std::path::{Component, Path, PathBuf};

use crate::error::{Result, TreeError};

/// Check that `candidate` stays within `root`.
///
/// Relative candidates are joined onto `root` first. Both paths are then
/// normalized with [`normalize`] and compared component-wise, so a sibling
/// directory sharing the root's name as a string prefix (`/a/bXYZ` against
/// `/a/b`) is rejected.
///
/// Returns the normalized candidate on success.
///
/// # Errors
///
/// Returns [`TreeError::Traversal`] if the normalized path is outside `root`.
pub fn validate(candidate: impl AsRef<Path>, root: impl AsRef<Path>) -> Result<PathBuf> {
    let root = normalize(root.as_ref());
    let candidate = candidate.as_ref();

    let path = if candidate.is_absolute() {
        normalize(candidate)
    } else {
        normalize(&root.join(candidate))
    };

    if path.starts_with(&root) {
        return Ok(path);
    }

    tracing::warn!(
        path = %path.display(),
        root = %root.display(),
        "directory traversal detected, failed check"
    );
    Err(TreeError::Traversal { path, root })
}

/// Lexically normalize a path.
///
/// Drops `.` segments and redundant separators and resolves `..` against the
/// preceding segment. `..` at the filesystem root stays at the root; leading
/// `..` segments of a relative path are kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let trailing_parent =
                    matches!(out.components().next_back(), Some(Component::ParentDir));
                if (trailing_parent || !out.pop()) && !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(segment) => out.push(segment),
        }
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
