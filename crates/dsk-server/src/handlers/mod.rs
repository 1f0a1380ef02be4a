//! HTTP request handlers.

pub(crate) mod api;
pub(crate) mod assets;
pub(crate) mod embed;
pub(crate) mod index;
pub(crate) mod tree;

use dsk_tree::{Node, TreeError};

use crate::state::AppState;

/// Open the node at `path` below the catalogue root.
///
/// Hidden nodes are reported as missing when the tree walk skips them, so a
/// node left out of the navigation cannot be reached by URL either.
pub(crate) fn open_node(state: &AppState, path: &str) -> Result<Node, TreeError> {
    let node = dsk_tree::node_at(path, &state.root)?;
    if state.skip_hidden && node.is_hidden() {
        return Err(TreeError::NotFound(node.path().to_path_buf()));
    }
    Ok(node)
}
