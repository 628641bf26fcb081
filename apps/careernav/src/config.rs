use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

/// Client configuration loaded from environment variables (and `.env` if present).
/// Everything has a default; only malformed values are errors.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    /// Durable store file. `None` keeps state in memory for this process only.
    pub store_path: Option<PathBuf>,
    /// Resolve every request locally without touching the network.
    pub offline: bool,
    /// `None` waits on the backend indefinitely.
    pub request_timeout: Option<Duration>,
    pub demo_email: String,
    pub demo_password: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base: optional_env("CAREERNAV_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            store_path: optional_env("CAREERNAV_STORE_PATH").map(PathBuf::from),
            offline: optional_env("CAREERNAV_OFFLINE")
                .map(|v| parse_flag(&v))
                .transpose()
                .context("CAREERNAV_OFFLINE must be true/false")?
                .unwrap_or(false),
            request_timeout: optional_env("CAREERNAV_REQUEST_TIMEOUT_SECS")
                .map(|v| v.parse::<u64>().map(Duration::from_secs))
                .transpose()
                .context("CAREERNAV_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            demo_email: optional_env("CAREERNAV_DEMO_EMAIL")
                .unwrap_or_else(|| "sai@gmail.com".to_string()),
            demo_password: optional_env("CAREERNAV_DEMO_PASSWORD")
                .unwrap_or_else(|| "12345".to_string()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Unset and blank variables both count as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognised flag value '{other}'"),
    }
}
