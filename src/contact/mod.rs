//! Contact form relay
//!
//! Validates a submission and forwards it to the configured destination
//! through an SMTP relay: one scoped connection, STARTTLS upgrade,
//! authenticate, transmit. Without relay credentials the submission is
//! recorded in the operational log instead (degraded mode).

use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::api::types::ContactSubmission;
use crate::config::ContactConfig;
use crate::error::ApiError;
use crate::logger;

const DELIVERY_MESSAGE: &str = "failed to deliver message";

/// Fully-resolved relay settings. Present only when the configuration
/// carries credentials; otherwise the handler stays in degraded mode.
pub struct Relay<'a> {
    pub host: &'a str,
    pub port: u16,
    pub user: &'a str,
    pub pass: &'a str,
    pub destination: &'a str,
    pub timeout: Duration,
}

impl<'a> Relay<'a> {
    /// Resolve relay settings from configuration.
    ///
    /// The destination defaults to the credential's own address. Empty
    /// strings count as unset so blank environment variables do not
    /// half-configure the relay.
    pub fn from_config(config: &'a ContactConfig) -> Option<Self> {
        let user = config.smtp_user.as_deref().filter(|s| !s.is_empty())?;
        let pass = config.smtp_pass.as_deref().filter(|s| !s.is_empty())?;
        let destination = config
            .destination
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(user);
        Some(Self {
            host: &config.smtp_host,
            port: config.smtp_port,
            user,
            pass,
            destination,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }
}

/// Reject a submission whose name, email, or message is empty after
/// trimming whitespace.
pub fn validate(submission: &ContactSubmission) -> Result<(), ApiError> {
    for (value, field) in [
        (&submission.name, "name"),
        (&submission.email, "email"),
        (&submission.message, "message"),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::Validation(format!("{field} is required")));
        }
    }
    Ok(())
}

/// Compose the relay message: subject derived from the sender's name,
/// Reply-To routed to the visitor so answers reach them directly.
pub fn compose(relay: &Relay<'_>, submission: &ContactSubmission) -> Result<Message, ApiError> {
    let from: Mailbox = relay.user.parse().map_err(|e| {
        logger::log_error(&format!("Relay sender address rejected: {e}"));
        ApiError::Upstream {
            message: DELIVERY_MESSAGE,
            detail: None,
        }
    })?;
    let to: Mailbox = relay.destination.parse().map_err(|e| {
        logger::log_error(&format!("Relay destination address rejected: {e}"));
        ApiError::Upstream {
            message: DELIVERY_MESSAGE,
            detail: None,
        }
    })?;
    let reply_to: Mailbox = submission
        .email
        .trim()
        .parse()
        .map_err(|_| ApiError::Validation("email is not a valid address".to_string()))?;

    Message::builder()
        .from(from)
        .reply_to(reply_to)
        .to(to)
        .subject(subject_for(&submission.name))
        .header(ContentType::TEXT_PLAIN)
        .body(render_body(submission))
        .map_err(|e| {
            logger::log_error(&format!("Failed to compose contact message: {e}"));
            ApiError::Upstream {
                message: DELIVERY_MESSAGE,
                detail: None,
            }
        })
}

/// Send the submission through the relay. Single attempt; the connection is
/// dropped on every exit path. Transport and authentication failures are
/// logged without credentials and surface only as a generic delivery error.
pub async fn deliver(relay: &Relay<'_>, submission: &ContactSubmission) -> Result<(), ApiError> {
    let message = compose(relay, submission)?;

    let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(relay.host)
        .map_err(|e| {
            logger::log_error(&format!("Relay connection setup failed: {e}"));
            ApiError::Upstream {
                message: DELIVERY_MESSAGE,
                detail: None,
            }
        })?
        .port(relay.port)
        .credentials(Credentials::new(relay.user.to_string(), relay.pass.to_string()))
        .timeout(Some(relay.timeout))
        .build();

    match transport.send(message).await {
        Ok(_) => Ok(()),
        Err(e) => {
            logger::log_error(&format!("Contact delivery failed: {e}"));
            Err(ApiError::Upstream {
                message: DELIVERY_MESSAGE,
                detail: None,
            })
        }
    }
}

fn subject_for(name: &str) -> String {
    format!("Portfolio contact from {}", name.trim())
}

fn render_body(submission: &ContactSubmission) -> String {
    let mut body = format!(
        "Name: {}\nEmail: {}\n",
        submission.name.trim(),
        submission.email.trim()
    );
    if !submission.topics.is_empty() {
        body.push_str(&format!("Topics: {}\n", submission.topics.join(", ")));
    }
    body.push_str(&format!("\n{}\n", submission.message.trim()));
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            message: "Keep in touch.".to_string(),
            topics: vec!["Collaboration".to_string(), "Rust".to_string()],
        }
    }

    fn relay_config(user: Option<&str>, pass: Option<&str>, dest: Option<&str>) -> ContactConfig {
        ContactConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            smtp_user: user.map(str::to_string),
            smtp_pass: pass.map(str::to_string),
            destination: dest.map(str::to_string),
            timeout_secs: 10,
        }
    }

    #[test]
    fn test_validation_rejects_empty_and_whitespace_fields() {
        for field in ["name", "email", "message"] {
            let mut sub = submission();
            match field {
                "name" => sub.name = "   ".to_string(),
                "email" => sub.email = String::new(),
                _ => sub.message = "\n\t".to_string(),
            }
            let err = validate(&sub).expect_err("should reject");
            assert!(matches!(err, ApiError::Validation(_)));
            assert!(err.to_string().contains(field));
        }
    }

    #[test]
    fn test_validation_accepts_complete_submission() {
        assert!(validate(&submission()).is_ok());
    }

    #[test]
    fn test_relay_requires_credentials() {
        assert!(Relay::from_config(&relay_config(None, None, None)).is_none());
        assert!(Relay::from_config(&relay_config(Some("relay@example.com"), None, None)).is_none());
        assert!(Relay::from_config(&relay_config(Some(""), Some("hunter2"), None)).is_none());
        assert!(Relay::from_config(&relay_config(Some("relay@example.com"), Some("hunter2"), None))
            .is_some());
    }

    #[test]
    fn test_destination_defaults_to_relay_account() {
        let config = relay_config(Some("relay@example.com"), Some("hunter2"), None);
        let relay = Relay::from_config(&config).unwrap();
        assert_eq!(relay.destination, "relay@example.com");

        let config = relay_config(
            Some("relay@example.com"),
            Some("hunter2"),
            Some("owner@example.com"),
        );
        let relay = Relay::from_config(&config).unwrap();
        assert_eq!(relay.destination, "owner@example.com");
    }

    #[test]
    fn test_compose_routes_replies_to_the_visitor() {
        let config = relay_config(
            Some("relay@example.com"),
            Some("hunter2"),
            Some("owner@example.com"),
        );
        let relay = Relay::from_config(&config).unwrap();
        let message = compose(&relay, &submission()).expect("compose should succeed");
        let rendered = String::from_utf8_lossy(&message.formatted()).to_string();

        assert!(rendered.contains("Reply-To: ada@example.com"));
        assert!(rendered.contains("To: owner@example.com"));
        assert!(rendered.contains("Subject: Portfolio contact from Ada Lovelace"));
        assert!(rendered.contains("Topics: Collaboration, Rust"));
        assert!(rendered.contains("Keep in touch."));
    }

    #[test]
    fn test_compose_rejects_unroutable_visitor_address() {
        let config = relay_config(Some("relay@example.com"), Some("hunter2"), None);
        let relay = Relay::from_config(&config).unwrap();
        let mut sub = submission();
        sub.email = "not an address".to_string();
        let err = compose(&relay, &sub).expect_err("should reject");
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
