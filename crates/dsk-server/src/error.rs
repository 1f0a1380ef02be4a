//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dsk_tree::TreeError;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Error from the design definitions tree.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// Frontend asset not found.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),
}

impl ServerError {
    pub(crate) fn status(&self) -> StatusCode {
        match self {
            Self::Tree(e) => tree_status(e),
            Self::AssetNotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

/// HTTP status for a tree error.
pub(crate) fn tree_status(err: &TreeError) -> StatusCode {
    match err {
        TreeError::Traversal { .. } => StatusCode::BAD_REQUEST,
        TreeError::NotFound(_)
        | TreeError::NoAssets { .. }
        | TreeError::VariantIndex { .. }
        | TreeError::VariantName(_) => StatusCode::NOT_FOUND,
        TreeError::Walk { .. }
        | TreeError::MetadataParse { .. }
        | TreeError::InvalidNode { .. }
        | TreeError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, self.to_string()).into_response()
    }
}
