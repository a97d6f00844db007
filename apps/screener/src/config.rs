use anyhow::Result;

const DEFAULT_API_URL: &str = "http://localhost:5000/api/resume";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the scoring backend's resume API.
    pub api_url: String,
    /// Provider API key to configure the backend with when it is not
    /// already configured. Optional: a running backend may carry one.
    pub api_key: Option<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_url: std::env::var("SCREENER_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            api_key: std::env::var("SCREENER_API_KEY").ok().filter(|k| !k.is_empty()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
