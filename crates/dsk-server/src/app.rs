//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index::get_index))
        .route("/assets/{*path}", get(handlers::assets::get_asset))
        .route("/api/", get(handlers::api::get_api_root))
        .route("/api/{*path}", get(handlers::api::get_api))
        .route("/tree/", get(handlers::tree::get_root_node))
        .route("/tree/{*path}", get(handlers::tree::get_node))
        .route("/embed/", get(handlers::embed::get_embed))
        .route("/embed/{*path}", get(handlers::embed::get_embed))
        .fallback(handlers::index::get_index)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}
