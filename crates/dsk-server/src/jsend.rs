//! JSend response envelope.
//!
//! `{"status": "success", "data": ...}` for 2xx, `{"status": "fail", ...}` for
//! 4xx and `{"status": "error", "message": ...}` for 5xx responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// A JSend envelope with its HTTP status.
#[derive(Debug)]
pub(crate) struct JSend {
    code: StatusCode,
    body: Envelope,
}

#[derive(Debug, Serialize)]
struct Envelope {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl JSend {
    /// Successful response carrying `data`.
    pub(crate) fn success(data: impl Serialize) -> Self {
        match serde_json::to_value(data) {
            Ok(data) => Self {
                code: StatusCode::OK,
                body: Envelope {
                    status: "success",
                    data: Some(data),
                    message: None,
                },
            },
            Err(e) => Self::error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        }
    }

    /// Failure response; the envelope status follows the HTTP status class.
    pub(crate) fn error(code: StatusCode, message: impl Into<String>) -> Self {
        let status = if code.is_client_error() {
            "fail"
        } else {
            "error"
        };
        Self {
            code,
            body: Envelope {
                status,
                data: None,
                message: Some(message.into()),
            },
        }
    }

    /// Failure response without a message.
    pub(crate) fn status(code: StatusCode) -> Self {
        let mut jsend = Self::error(code, String::new());
        jsend.body.message = None;
        jsend
    }
}

impl IntoResponse for JSend {
    fn into_response(self) -> Response {
        (self.code, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_success_envelope() {
        let jsend = JSend::success(json!({"root": {"url": "/"}}));

        assert_eq!(jsend.code, StatusCode::OK);
        assert_eq!(
            serde_json::to_value(&jsend.body).unwrap(),
            json!({"status": "success", "data": {"root": {"url": "/"}}})
        );
    }

    #[test]
    fn test_client_error_is_fail() {
        let jsend = JSend::error(StatusCode::BAD_REQUEST, "directory traversal attempted");

        assert_eq!(
            serde_json::to_value(&jsend.body).unwrap(),
            json!({"status": "fail", "message": "directory traversal attempted"})
        );
    }

    #[test]
    fn test_server_error_is_error() {
        let jsend = JSend::error(StatusCode::INTERNAL_SERVER_ERROR, "walk failed");

        assert_eq!(jsend.body.status, "error");
    }

    #[test]
    fn test_bare_status() {
        let jsend = JSend::status(StatusCode::NOT_FOUND);

        assert_eq!(jsend.code, StatusCode::NOT_FOUND);
        assert_eq!(
            serde_json::to_value(&jsend.body).unwrap(),
            json!({"status": "fail"})
        );
    }
}
