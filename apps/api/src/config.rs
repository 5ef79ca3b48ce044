use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// A missing LLM credential is a fatal startup condition, not a per-turn error.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    /// Path of the append-only candidate record file.
    pub candidate_data_file: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            candidate_data_file: std::env::var("CANDIDATE_DATA_FILE")
                .unwrap_or_else(|_| "candidate_data.json".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
