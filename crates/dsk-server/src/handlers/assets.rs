//! Frontend assets endpoint.

use std::path::Path as FsPath;

use axum::body::Body;
use axum::extract::Path;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::error::ServerError;

/// Virtual root the requested asset path is checked against.
const ASSETS_ROOT: &str = "/assets";

/// Handle GET /assets/{path}.
pub(crate) async fn get_asset(Path(path): Path<String>) -> Result<Response, ServerError> {
    let name = asset_name(&path)?;

    let asset = dsk_assets::load(&name).ok_or(ServerError::AssetNotFound(name))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, asset.mime)],
        Body::from(asset.content.into_owned()),
    )
        .into_response())
}

/// Resolve the request path to a slash-separated asset name.
fn asset_name(path: &str) -> Result<String, ServerError> {
    let checked = dsk_tree::validate(path, ASSETS_ROOT)?;
    let rel = checked
        .strip_prefix(ASSETS_ROOT)
        .unwrap_or_else(|_| FsPath::new(""));

    Ok(rel
        .iter()
        .filter_map(|segment| segment.to_str())
        .collect::<Vec<_>>()
        .join("/"))
}
