use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration loaded from environment variables.
/// Fails at startup if `GEMINI_API_KEY` is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub data_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

/// Settings for the Gemini gateway. Constructed once and handed to `LlmClient::new`.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub api_url: String,
    pub timeout: Duration,
    /// Ask the model for `application/json` output. Regex extraction still runs.
    pub json_mode: bool,
    /// Model text longer than this is rejected before the JSON scan.
    pub max_scan_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            llm: LlmConfig {
                api_key: require_env("GEMINI_API_KEY")?,
                api_url: std::env::var("GEMINI_API_URL")
                    .unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string()),
                timeout: Duration::from_secs(
                    parse_env("LLM_TIMEOUT_SECS", 60)
                        .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
                ),
                json_mode: parse_env("LLM_JSON_MODE", true)
                    .context("LLM_JSON_MODE must be true or false")?,
                max_scan_bytes: parse_env("LLM_MAX_SCAN_BYTES", 256 * 1024)
                    .context("LLM_MAX_SCAN_BYTES must be a byte count")?,
            },
            data_dir: std::env::var("DATA_DIR")
                .unwrap_or_else(|_| "data".to_string())
                .into(),
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

#[cfg(test)]
impl LlmConfig {
    /// Config pointing at an arbitrary base URL, used to aim the client at a local stub.
    pub fn for_base_url(api_url: impl Into<String>) -> Self {
        Self {
            api_key: "test-key".to_string(),
            api_url: api_url.into(),
            timeout: Duration::from_secs(60),
            json_mode: true,
            max_scan_bytes: 256 * 1024,
        }
    }
}

/// A blank value counts as unset.
fn require_env(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for '{key}'")),
        Err(_) => Ok(default),
    }
}
