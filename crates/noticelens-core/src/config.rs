//! Client configuration.

use std::time::Duration;

use crate::history::HISTORY_LIMIT;
use crate::pipeline::ANALYSIS_DELAY;
use crate::toast::TOAST_DURATION;

/// Where the auth endpoints live when nothing else is configured.
pub const DEFAULT_AUTH_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL for `POST /register` and `POST /login`.
    pub auth_base_url: String,
    /// Simulated processing time before a file is classified.
    pub analysis_delay: Duration,
    /// How long a transient message stays visible.
    pub toast_duration: Duration,
    /// Maximum number of history entries kept.
    pub history_limit: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            auth_base_url: DEFAULT_AUTH_URL.to_string(),
            analysis_delay: ANALYSIS_DELAY,
            toast_duration: TOAST_DURATION,
            history_limit: HISTORY_LIMIT,
        }
    }
}
