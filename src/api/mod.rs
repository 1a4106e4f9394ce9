// API module entry
// Dispatches portfolio API requests by method and path

mod handlers;
mod response;
pub mod types;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::sync::Arc;

use crate::config::AppState;
use crate::logger;

/// API route handler
///
/// Dispatches to handler functions based on request path and method.
/// CORS preflight and body-size limits are settled before any handler runs.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);

    if method == Method::OPTIONS {
        return Ok(response::preflight());
    }

    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        logger::log_api_request(method.as_str(), &path, resp.status().as_u16());
        return Ok(resp);
    }

    let resp = match (&method, path.as_str()) {
        (&Method::GET, "/healthz") => {
            response::json_response(StatusCode::OK, &serde_json::json!({ "status": "ok" }))
        }
        (&Method::GET, "/api/projects") => handlers::handle_projects(),
        (&Method::POST, "/api/contact") => handlers::handle_contact(req, Arc::clone(&state)).await,
        (&Method::GET, "/api/leetcode") => handlers::handle_stats(query.as_deref(), &state).await,
        (_, "/healthz" | "/api/projects" | "/api/contact" | "/api/leetcode") => {
            logger::log_warning(&format!("Method not allowed: {method} {path}"));
            response::method_not_allowed()
        }
        _ => response::not_found(),
    };

    if state.config.logging.access_log {
        logger::log_api_request(method.as_str(), &path, resp.status().as_u16());
    }

    Ok(resp)
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(response::payload_too_large())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}
