// Configuration module entry point
// Loads the process-wide configuration once at startup

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{Config, ContactConfig, HttpConfig, LoggingConfig, ServerConfig, StatsConfig};

impl Config {
    /// Load configuration from the default `config.toml` location.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the specified file path (without extension),
    /// layered under `PORTFOLIO__*` environment variables.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("PORTFOLIO").separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("logging.access_log", true)?
            .set_default("http.max_body_size", 65_536)? // 64KB, plenty for a contact form
            .set_default("http.keep_alive_timeout", 75)?
            .set_default("http.read_timeout", 30)?
            .set_default("http.write_timeout", 30)?
            .set_default("contact.smtp_host", "smtp.gmail.com")?
            .set_default("contact.smtp_port", 587)?
            .set_default("contact.timeout_secs", 10)?
            .set_default(
                "stats.url_template",
                "https://leetcode-stats-api.herokuapp.com/{username}",
            )?
            .set_default("stats.timeout_secs", 8)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
