//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the mock server.
    pub base_url: String,
    /// Run against the in-memory collection instead of the server.
    pub offline: bool,
    /// Optional JSON file of posts to seed the offline collection with.
    pub seed_path: Option<PathBuf>,
    /// Where the session credentials are persisted.
    pub credentials_path: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("BLOG_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            offline: env::var("BLOG_OFFLINE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            seed_path: env::var("BLOG_SEED").ok().map(PathBuf::from),
            credentials_path: env::var("BLOG_CREDENTIALS")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".miniblog-session.json")),
        }
    }
}
