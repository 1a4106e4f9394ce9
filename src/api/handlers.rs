// Portfolio API handlers module

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Request, Response, StatusCode};
use std::sync::Arc;

use super::response::{error_response, json_response};
use super::types::ContactSubmission;
use crate::config::AppState;
use crate::contact::{self, Relay};
use crate::error::ApiError;
use crate::logger;
use crate::projects;
use crate::stats;

/// GET /api/projects: the fixed project list, same set and order every call.
pub fn handle_projects() -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &projects::all())
}

/// POST /api/contact: parse the body, then hand off to [`process_contact`].
pub async fn handle_contact(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Response<Full<Bytes>> {
    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            return error_response(&ApiError::Validation(format!(
                "failed to read request body: {e}"
            )))
        }
    };

    let submission: ContactSubmission = match serde_json::from_slice(&body) {
        Ok(s) => s,
        Err(e) => return error_response(&ApiError::Validation(format!("invalid JSON body: {e}"))),
    };

    process_contact(&state, &submission).await
}

/// Validate and relay one contact submission.
///
/// Without relay credentials the submission goes to the operational log and
/// the caller still gets an acknowledgment, annotated that delivery was
/// skipped.
pub async fn process_contact(
    state: &AppState,
    submission: &ContactSubmission,
) -> Response<Full<Bytes>> {
    if let Err(e) = contact::validate(submission) {
        return error_response(&e);
    }

    match Relay::from_config(&state.config.contact) {
        None => {
            logger::log_contact_record(submission);
            json_response(
                StatusCode::OK,
                &serde_json::json!({
                    "ok": true,
                    "note": "delivery skipped: mail relay not configured",
                }),
            )
        }
        Some(relay) => match contact::deliver(&relay, submission).await {
            Ok(()) => json_response(StatusCode::OK, &serde_json::json!({ "ok": true })),
            Err(e) => error_response(&e),
        },
    }
}

/// GET /api/leetcode?user=<username>: fetch the upstream document and serve
/// it normalized. The username is checked before any upstream call.
pub async fn handle_stats(query: Option<&str>, state: &AppState) -> Response<Full<Bytes>> {
    let username = match query_param(query, "user") {
        Some(u) if !u.trim().is_empty() => u,
        _ => {
            return error_response(&ApiError::Validation(
                "missing user query parameter".to_string(),
            ))
        }
    };

    let Some(client) = state.stats_client.as_ref() else {
        return error_response(&ApiError::Configuration("stats client unavailable"));
    };

    let url = stats::upstream_url(&state.config.stats.url_template, &username);
    match stats::fetch_document(client, &url).await {
        Ok(doc) => json_response(StatusCode::OK, &stats::normalize(&doc, &username)),
        Err(e) => {
            logger::log_error(&format!("Stats upstream failure for '{username}': {e}"));
            error_response(&e)
        }
    }
}

/// First value for `name` in a URL query string.
fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    async fn body_json(response: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn unconfigured_state() -> AppState {
        let config = Config::load_from("does-not-exist").unwrap();
        AppState::new(config)
    }

    #[test]
    fn test_query_param_extraction() {
        assert_eq!(
            query_param(Some("user=alice&x=1"), "user").as_deref(),
            Some("alice")
        );
        assert_eq!(
            query_param(Some("user=a%2Fb"), "user").as_deref(),
            Some("a/b")
        );
        assert_eq!(query_param(Some("x=1"), "user"), None);
        assert_eq!(query_param(None, "user"), None);
    }

    #[tokio::test]
    async fn test_projects_returns_the_fixed_list() {
        let response = handle_projects();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[0]["title"], "LifeAura AI / SANKALP");
    }

    #[tokio::test]
    async fn test_contact_validation_failure_is_client_error() {
        let state = unconfigured_state();
        let submission = ContactSubmission {
            name: "  ".to_string(),
            email: "ada@example.com".to_string(),
            message: "hello".to_string(),
            topics: Vec::new(),
        };
        let response = process_contact(&state, &submission).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("name"));
    }

    #[tokio::test]
    async fn test_contact_without_relay_acknowledges_with_note() {
        let state = unconfigured_state();
        let submission = ContactSubmission {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "hello".to_string(),
            topics: Vec::new(),
        };
        let response = process_contact(&state, &submission).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["ok"], true);
        assert!(json["note"].as_str().unwrap().contains("skipped"));
    }

    #[tokio::test]
    async fn test_stats_missing_user_is_rejected_before_any_fetch() {
        let state = unconfigured_state();
        let response = handle_stats(None, &state).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = handle_stats(Some("user="), &state).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
