// API error types
// The three failure kinds the HTTP surface can report, mapped to status codes.

use hyper::StatusCode;
use thiserror::Error;

/// Request-level error surfaced to API callers as a JSON body.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Client-caused input error (missing field, bad JSON, missing query
    /// parameter). Never retried, fully surfaced.
    #[error("{0}")]
    Validation(String),

    /// Outbound dependency failure (mail relay or statistics upstream).
    /// Surfaced as a generic message; `detail` carries raw upstream error
    /// text when the caller is entitled to it.
    #[error("{message}")]
    Upstream {
        message: &'static str,
        detail: Option<String>,
    },

    /// A capability required by the handler is unavailable.
    #[error("{0}")]
    Configuration(&'static str),
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
            Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn upstream(message: &'static str, detail: impl Into<String>) -> Self {
        Self::Upstream {
            message,
            detail: Some(detail.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Validation("name is required".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::upstream("upstream unavailable", "connect refused").status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::Configuration("stats client unavailable").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
