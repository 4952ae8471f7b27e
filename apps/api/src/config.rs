use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every key has a default; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Longest narrative the extract endpoint accepts, in characters.
    pub max_text_chars: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_text_chars: std::env::var("MAX_TEXT_CHARS")
                .unwrap_or_else(|_| "50000".to_string())
                .parse::<usize>()
                .context("MAX_TEXT_CHARS must be a positive integer")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            max_text_chars: 50_000,
        }
    }
}
