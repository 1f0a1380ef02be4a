//! JSON API endpoint.
//!
//! Every response is wrapped in a JSend envelope. The only resource is
//! `tree`, used by the navigation sidebar.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::error::tree_status;
use crate::jsend::JSend;
use crate::state::AppState;

/// Handle GET /api/ (no resource).
pub(crate) async fn get_api_root(State(state): State<Arc<AppState>>) -> JSend {
    api_response(&state, "")
}

/// Handle GET /api/{path}.
pub(crate) async fn get_api(Path(path): Path<String>, State(state): State<Arc<AppState>>) -> JSend {
    api_response(&state, &path)
}

fn api_response(state: &AppState, path: &str) -> JSend {
    // Nothing below reads from `path` yet; it is still checked so that
    // future resources cannot skip the guard.
    if let Err(e) = dsk_tree::validate(path, &state.root) {
        return JSend::error(tree_status(&e), e.to_string());
    }

    match path {
        "tree" => tree(state),
        _ => JSend::status(StatusCode::NOT_FOUND),
    }
}

fn tree(state: &AppState) -> JSend {
    match state.tree_builder().build() {
        Ok(tree) => {
            tracing::debug!(nodes = tree.len(), "Tree built");
            JSend::success(&tree)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to build tree");
            JSend::error(tree_status(&e), e.to_string())
        }
    }
}
