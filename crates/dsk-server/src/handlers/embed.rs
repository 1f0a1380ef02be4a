//! Embed endpoint.
//!
//! Serves everything a demo stage iframe needs:
//!
//! - `/embed/<node>.css` and `/embed/<node>.js`: bundled node assets
//! - `/embed/<node>` and `/embed/<node>:<selector>`: the stage page

use std::borrow::Cow;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use dsk_tree::{TreeError, asset_files, split_variant};
use md5::{Digest, Md5};
use percent_encoding::percent_decode_str;

use crate::error::ServerError;
use crate::handlers::open_node;
use crate::state::AppState;
use crate::views::{self, StagePage};

/// Handle GET /embed/ and GET /embed/{path}.
///
/// Works on the raw request path so that the demo selector is decoded
/// exactly once.
pub(crate) async fn get_embed(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response, ServerError> {
    let raw = uri
        .path()
        .strip_prefix("/embed")
        .unwrap_or_default()
        .trim_start_matches('/');

    if let Some(path) = raw.strip_suffix(".css") {
        return bundle_response(&state, &headers, path, "css", "text/css");
    }
    if let Some(path) = raw.strip_suffix(".js") {
        return bundle_response(&state, &headers, path, "js", "application/javascript");
    }
    stage(&state, raw)
}

fn bundle_response(
    state: &AppState,
    headers: &HeaderMap,
    raw: &str,
    extension: &str,
    content_type: &str,
) -> Result<Response, ServerError> {
    let node = open_node(state, &decode(raw))?;
    let body = node.bundled_assets(extension)?;

    let etag = compute_etag(&state.version, &body);
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_owned()),
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "no-cache".to_owned()),
        ],
        body,
    )
        .into_response())
}

fn stage(state: &AppState, raw: &str) -> Result<Response, ServerError> {
    let (path, selector) = split_variant(raw);
    let node = open_node(state, &decode(path))?;

    let props = match selector {
        Some(selector) => match node.demo_variant(selector) {
            Ok(props) => Some(props),
            Err(e @ (TreeError::VariantIndex { .. } | TreeError::VariantName(_))) => {
                tracing::debug!(url = node.url(), error = %e, "Unknown demo variant");
                None
            }
            Err(e) => return Err(e.into()),
        },
        None => None,
    };

    let page = StagePage {
        title: node.title().to_owned(),
        url: node.url().to_owned(),
        import_name: node.import_name()?,
        props,
        has_css: !asset_files(node.path(), "css")?.is_empty(),
        has_js: !asset_files(node.path(), "js")?.is_empty(),
    };
    Ok(Html(views::render_stage(&page)).into_response())
}

fn decode(raw: &str) -> Cow<'_, str> {
    percent_decode_str(raw).decode_utf8_lossy()
}

/// Compute `ETag` from version and content.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars).
fn compute_etag(version: &str, content: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(version.as_bytes());
    hasher.update(b":");
    hasher.update(content);
    format!("\"{}\"", &hex::encode(hasher.finalize())[..16])
}
