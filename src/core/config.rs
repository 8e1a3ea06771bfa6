//! Server configuration from environment variables.
//!
//! Load configuration using `Config::from_env()` after calling `dotenvy::dotenv()`.
//! Site settings (address, bundle paths) come from `[package.metadata.leptos]`
//! instead.

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Base URL of the backend REST API, without a trailing slash.
    /// Requests to `/api/*` are forwarded here.
    /// Example: http://localhost:8000
    pub backend_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let backend_url = lookup("BACKEND_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Self { backend_url }
    }

    /// Check if the backend is configured
    pub fn has_backend(&self) -> bool {
        self.backend_url.is_some()
    }
}
