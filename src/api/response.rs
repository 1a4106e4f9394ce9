// API response utility functions module
// JSON response builders; every response carries permissive CORS headers.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::response::Builder;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::error::ApiError;
use crate::logger;

/// Response builder with the shared API headers applied.
///
/// The frontend is served from a different origin, so every response allows
/// any origin.
fn api_builder(status: StatusCode) -> Builder {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
}

/// Build JSON response
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return api_builder(StatusCode::INTERNAL_SERVER_ERROR)
                .body(Full::new(Bytes::from(
                    r#"{"error":"internal server error"}"#,
                )))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Error"))));
        }
    };

    api_builder(status)
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build response: {e}"));
            Response::new(Full::new(Bytes::from("Error")))
        })
}

/// Map an [`ApiError`] to its JSON error response.
///
/// Validation and configuration errors carry only `error`; upstream errors
/// attach `detail` when raw upstream text is available.
pub fn error_response(err: &ApiError) -> Response<Full<Bytes>> {
    let body = match err {
        ApiError::Upstream {
            detail: Some(detail),
            ..
        } => serde_json::json!({ "error": err.to_string(), "detail": detail }),
        _ => serde_json::json!({ "error": err.to_string() }),
    };
    json_response(err.status(), &body)
}

/// 404 Not Found response listing the available endpoints
pub fn not_found() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::NOT_FOUND,
        &serde_json::json!({
            "error": "not found",
            "available_endpoints": ["/api/projects", "/api/contact", "/api/leetcode", "/healthz"],
        }),
    )
}

/// 405 Method Not Allowed response
pub fn method_not_allowed() -> Response<Full<Bytes>> {
    api_builder(StatusCode::METHOD_NOT_ALLOWED)
        .header("Allow", "GET, POST, OPTIONS")
        .body(Full::new(Bytes::from(
            r#"{"error":"method not allowed"}"#,
        )))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Method Not Allowed"))))
}

/// 413 Payload Too Large response
pub fn payload_too_large() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::PAYLOAD_TOO_LARGE,
        &serde_json::json!({ "error": "request body too large" }),
    )
}

/// Build OPTIONS response (CORS preflight)
pub fn preflight() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", "GET, POST, OPTIONS")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .header("Access-Control-Max-Age", "86400")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build OPTIONS response: {e}"));
            Response::new(Full::new(Bytes::new()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_response_carries_cors_header() {
        let resp = json_response(StatusCode::OK, &serde_json::json!({"ok": true}));
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get("Access-Control-Allow-Origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
        assert_eq!(
            resp.headers()
                .get("Content-Type")
                .and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
    }

    #[test]
    fn test_error_response_attaches_upstream_detail() {
        let err = ApiError::upstream("stats upstream unavailable", "connect timed out");
        let resp = error_response(&err);
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_preflight_allows_posts_from_any_origin() {
        let resp = preflight();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        let methods = resp
            .headers()
            .get("Access-Control-Allow-Methods")
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert!(methods.contains("POST"));
    }
}
