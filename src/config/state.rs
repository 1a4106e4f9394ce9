// Application state module
// Configuration plus the shared outbound client, built once at startup

use crate::stats;

use super::types::Config;

/// Application state shared by every request handler.
///
/// Configuration is read-only at request time; handlers take what they need
/// and hold no state of their own.
pub struct AppState {
    pub config: Config,
    /// Shared outbound HTTP client for the stats upstream. `None` when the
    /// client could not be built; the stats endpoint then reports the
    /// missing capability.
    pub stats_client: Option<reqwest::Client>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let stats_client = stats::build_client(&config.stats);
        Self {
            config,
            stats_client,
        }
    }
}
