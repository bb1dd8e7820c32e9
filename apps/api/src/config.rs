use std::time::Duration;

use anyhow::{Context, Result};

/// Model identifiers tried in priority order when `AI_MODELS` is not set.
pub const DEFAULT_MODELS: &[&str] = &["gemini-1.5-flash", "gemini-2.0-flash-exp", "gemini-pro"];

/// Application configuration loaded from environment variables.
///
/// Nothing here is strictly required: a missing credential routes every AI call
/// to the mock responder, and a missing database disables persistence.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub database_url: Option<String>,
    pub ai_models: Vec<String>,
    pub ai_deadline: Option<Duration>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY")
                .or_else(|| optional_env("GOOGLEGEMINI_API_KEY")),
            database_url: optional_env("DATABASE_URL"),
            ai_models: parse_model_list(optional_env("AI_MODELS").as_deref()),
            ai_deadline: optional_env("AI_DEADLINE_SECS")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("AI_DEADLINE_SECS must be a whole number of seconds")?
                .map(Duration::from_secs),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Empty values are treated the same as unset ones.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Splits a comma-separated model list, falling back to [`DEFAULT_MODELS`]
/// when the value is missing or holds no usable entries.
pub fn parse_model_list(raw: Option<&str>) -> Vec<String> {
    let models: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect();

    if models.is_empty() {
        DEFAULT_MODELS.iter().map(|m| m.to_string()).collect()
    } else {
        models
    }
}
