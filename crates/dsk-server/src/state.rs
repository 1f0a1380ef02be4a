//! Application state.
//!
//! Shared state for all request handlers.

use std::path::PathBuf;

use dsk_tree::TreeBuilder;

/// Application state shared across all handlers.
#[derive(Debug)]
pub(crate) struct AppState {
    /// Absolute catalogue root directory.
    pub(crate) root: PathBuf,
    /// Leave out directories starting with a dot when listing the tree.
    pub(crate) skip_hidden: bool,
    /// Name shown in the index page.
    pub(crate) project_name: String,
    /// Application version (for `ETag` computation).
    pub(crate) version: String,
}

impl AppState {
    /// Tree builder for the catalogue root with the configured walk options.
    pub(crate) fn tree_builder(&self) -> TreeBuilder {
        TreeBuilder::new(&self.root).skip_hidden(self.skip_hidden)
    }
}
