// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub http: HttpConfig,
    pub contact: ContactConfig,
    pub stats: StatsConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access/info log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// HTTP connection configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub max_body_size: u64,
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
}

/// Mail relay configuration for the contact form.
///
/// Credentials and destination are optional: without them the contact
/// handler runs in degraded log-only mode.
#[derive(Debug, Deserialize, Clone)]
pub struct ContactConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_user: Option<String>,
    #[serde(default)]
    pub smtp_pass: Option<String>,
    /// Recipient address, defaults to the credential's own address
    #[serde(default)]
    pub destination: Option<String>,
    pub timeout_secs: u64,
}

/// Statistics upstream configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StatsConfig {
    /// Upstream URL with a `{username}` placeholder
    pub url_template: String,
    pub timeout_secs: u64,
}
