//! Node page endpoint.
//!
//! Returns the HTML fragment the index page shows for one node.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Html;

use crate::error::ServerError;
use crate::handlers::open_node;
use crate::state::AppState;
use crate::views::{self, NodePage};

/// Handle GET /tree/ (root node).
pub(crate) async fn get_root_node(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ServerError> {
    node_page(&state, "")
}

/// Handle GET /tree/{path}.
pub(crate) async fn get_node(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ServerError> {
    node_page(&state, &path)
}

fn node_page(state: &AppState, path: &str) -> Result<Html<String>, ServerError> {
    let node = open_node(state, path)?;

    let children = state
        .tree_builder()
        .children_of(&node)?
        .into_iter()
        .map(|child| (child.url().to_owned(), child.title().to_owned()))
        .collect();

    let page = NodePage {
        title: node.title().to_owned(),
        url: node.url().to_owned(),
        import_name: node.import_name()?,
        documentation: node.documentation()?,
        crumbs: node.crumbs(),
        demos: node.demo_variants()?,
        children,
    };
    Ok(Html(views::render_node(&page)))
}
