//! Error types for tree discovery and node access.

use std::path::PathBuf;

/// Error returned by tree building and node capabilities.
///
/// [`Traversal`](Self::Traversal) and [`Walk`](Self::Walk) are fatal to the
/// operation that raised them. Every other variant is scoped to a single node
/// and never affects its siblings.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// Candidate path resolves outside the catalogue root.
    #[error("directory traversal attempted: {} is outside {}", path.display(), root.display())]
    Traversal {
        /// Normalized candidate path.
        path: PathBuf,
        /// Catalogue root.
        root: PathBuf,
    },

    /// Filesystem walk failed; no partial tree is produced.
    #[error("failed to walk directory tree {}: {source}", root.display())]
    Walk {
        /// Root the walk started at.
        root: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// `index.json` is present but not valid.
    #[error("invalid metadata in {}: {source}", path.display())]
    MetadataParse {
        /// Path to the offending `index.json`.
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No files with the requested extension in the node directory.
    #[error("no .{extension} assets in path {}", path.display())]
    NoAssets {
        /// Requested extension, without the dot.
        extension: String,
        /// Node directory.
        path: PathBuf,
    },

    /// Demo index out of range.
    #[error("demo variant {index} out of range (node has {len})")]
    VariantIndex { index: usize, len: usize },

    /// No demo carries the requested name.
    #[error("no demo variant named {0:?}")]
    VariantName(String),

    /// Path does not point to an existing directory.
    #[error("node not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A directory could not be turned into a node.
    #[error("invalid node {}: {reason}", path.display())]
    InvalidNode {
        path: PathBuf,
        reason: &'static str,
    },

    /// Reading a present file failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TreeError {
    /// Wrap an I/O error with the path it occurred at.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for this crate.
pub type Result<T, E = TreeError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traversal_display_includes_path_and_root() {
        let err = TreeError::Traversal {
            path: PathBuf::from("/etc/passwd"),
            root: PathBuf::from("/catalog"),
        };

        let msg = err.to_string();
        assert!(msg.contains("/etc/passwd"));
        assert!(msg.contains("/catalog"));
    }

    #[test]
    fn test_no_assets_display() {
        let err = TreeError::NoAssets {
            extension: "scss".to_owned(),
            path: PathBuf::from("/catalog/Button"),
        };

        assert_eq!(err.to_string(), "no .scss assets in path /catalog/Button");
    }
}
