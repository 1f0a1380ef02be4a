//! Index page.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;

use crate::state::AppState;
use crate::views;

/// Handle GET / and every path no other route claims.
///
/// The navigation script reads the location and loads the matching node.
pub(crate) async fn get_index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(views::render_index(&state.project_name, &state.version))
}
