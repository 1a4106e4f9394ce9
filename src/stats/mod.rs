//! Coding-profile statistics proxy
//!
//! Fetches a third-party statistics document for one username and reshapes
//! it through [`normalize`]. One bounded-timeout request, no retry.

pub mod normalize;

pub use normalize::normalize;

use std::time::Duration;

use serde_json::Value;

use crate::config::StatsConfig;
use crate::error::ApiError;
use crate::logger;

const UPSTREAM_MESSAGE: &str = "stats upstream unavailable";

// Upstream error bodies are surfaced to the caller; keep them bounded.
const MAX_DETAIL_BYTES: usize = 2048;

/// Build the shared outbound HTTP client once at startup.
///
/// Returns `None` when the client cannot be constructed; the stats handler
/// then reports the missing capability instead of the process failing.
pub fn build_client(config: &StatsConfig) -> Option<reqwest::Client> {
    match reqwest::Client::builder()
        .user_agent("portfolio-backend/stats")
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
    {
        Ok(client) => Some(client),
        Err(e) => {
            logger::log_error(&format!("Failed to build stats HTTP client: {e}"));
            None
        }
    }
}

/// Substitute the username into the configured URL template.
pub fn upstream_url(template: &str, username: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(username.as_bytes()).collect();
    template.replace("{username}", &encoded)
}

/// Fetch the raw upstream statistics document.
///
/// Network failure, a non-success status, and an unparsable body all report
/// as the same upstream error, with the raw detail attached for the caller.
pub async fn fetch_document(client: &reqwest::Client, url: &str) -> Result<Value, ApiError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ApiError::upstream(UPSTREAM_MESSAGE, e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::upstream(
            UPSTREAM_MESSAGE,
            truncate_detail(&format!("upstream status {status}: {body}")),
        ));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| ApiError::upstream(UPSTREAM_MESSAGE, format!("invalid upstream JSON: {e}")))
}

fn truncate_detail(detail: &str) -> String {
    if detail.len() <= MAX_DETAIL_BYTES {
        return detail.to_string();
    }
    let mut end = MAX_DETAIL_BYTES;
    while !detail.is_char_boundary(end) {
        end -= 1;
    }
    detail[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn test_config() -> StatsConfig {
        StatsConfig {
            url_template: String::new(),
            timeout_secs: 2,
        }
    }

    #[test]
    fn test_upstream_url_substitution() {
        let url = upstream_url("https://stats.example.com/{username}", "alice");
        assert_eq!(url, "https://stats.example.com/alice");
    }

    #[test]
    fn test_upstream_url_encodes_username() {
        let url = upstream_url("https://stats.example.com/{username}", "a/b c");
        assert_eq!(url, "https://stats.example.com/a%2Fb+c");
    }

    #[tokio::test]
    async fn test_fetch_and_normalize_round_trip() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/stats/alice");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"easySolved": 5, "mediumSolved": 3, "hardSolved": 1}));
        });

        let client = build_client(&test_config()).expect("client should build");
        let url = upstream_url(&server.url("/stats/{username}"), "alice");
        let doc = fetch_document(&client, &url).await.expect("fetch should succeed");
        let stats = normalize(&doc, "alice");

        mock.assert();
        assert_eq!(stats.total_solved, serde_json::Number::from(9));
    }

    #[tokio::test]
    async fn test_non_success_status_is_upstream_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/stats/alice");
            then.status(503).body("maintenance");
        });

        let client = build_client(&test_config()).expect("client should build");
        let err = fetch_document(&client, &server.url("/stats/alice"))
            .await
            .expect_err("should fail");
        match err {
            ApiError::Upstream { detail, .. } => {
                let detail = detail.expect("detail attached");
                assert!(detail.contains("503"));
                assert!(detail.contains("maintenance"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unparsable_body_is_upstream_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/stats/alice");
            then.status(200).body("<html>not json</html>");
        });

        let client = build_client(&test_config()).expect("client should build");
        let err = fetch_document(&client, &server.url("/stats/alice"))
            .await
            .expect_err("should fail");
        assert!(matches!(err, ApiError::Upstream { .. }));
    }
}
