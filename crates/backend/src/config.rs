//! Client configuration loaded from environment variables.

/// Backend client configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `API_BASE_URL` — backend base URL (default: `"http://localhost:3000/api"`)
/// - `API_AUTH_TOKEN` — bearer token to start with (default: none)
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl BackendConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000/api".to_string()),
            token: std::env::var("API_AUTH_TOKEN").ok(),
        }
    }

    /// Overrides the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            token: None,
        }
    }
}
