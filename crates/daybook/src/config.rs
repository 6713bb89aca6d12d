use std::env;

/// Data-layer configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the daybook API (default: "http://localhost:8000")
    pub api_url: String,
    /// Maximum number of cached views (default: 10,000)
    pub cache_max_entries: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DAYBOOK_API_URL` - API base URL (default: "http://localhost:8000")
    /// - `CACHE_MAX_ENTRIES` - Maximum cached views (default: 10,000)
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("DAYBOOK_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            cache_max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
