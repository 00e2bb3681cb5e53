use anyhow::{Context, Result};

/// Default prefix of the persisted profile blob key.
pub const DEFAULT_STORAGE_KEY: &str = "career-pilot-storage";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Unset means profiles are kept in process memory only.
    pub redis_url: Option<String>,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Upper bound for a single model call. Expiry counts as an upstream failure.
    pub llm_timeout_secs: u64,
    pub storage_key: String,
    /// Interview sessions untouched for this long are dropped.
    pub interview_idle_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            redis_url: std::env::var("REDIS_URL").ok().filter(|v| !v.trim().is_empty()),
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            storage_key: std::env::var("STORAGE_KEY")
                .unwrap_or_else(|_| DEFAULT_STORAGE_KEY.to_string()),
            interview_idle_secs: std::env::var("INTERVIEW_IDLE_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse::<u64>()
                .context("INTERVIEW_IDLE_SECS must be a whole number of seconds")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
