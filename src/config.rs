// src/config.rs
use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

pub const BACKEND_URL_KEY: &str = "TULU_BACKEND_URL";
pub const REQUEST_TIMEOUT_KEY: &str = "TULU_REQUEST_TIMEOUT_SECS";
pub const BIND_ADDR_KEY: &str = "TULU_BIND_ADDR";
pub const SESSION_TTL_KEY: &str = "TULU_SESSION_TTL_SECS";

const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: Url,
    pub request_timeout: Duration,
    pub bind_addr: String,
    pub session_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: Url::parse(DEFAULT_BACKEND_URL).expect("default backend url is valid"),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

impl Config {
    /// Read from the process environment. Call `dotenvy::dotenv()` first to
    /// pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(BACKEND_URL_KEY) {
            config.backend_url = parse_backend_url(&raw)?;
        }
        if let Some(raw) = lookup(REQUEST_TIMEOUT_KEY) {
            config.request_timeout = parse_secs(REQUEST_TIMEOUT_KEY, &raw)?;
        }
        if let Some(raw) = lookup(BIND_ADDR_KEY) {
            config.bind_addr = raw.trim().to_string();
        }
        if let Some(raw) = lookup(SESSION_TTL_KEY) {
            config.session_ttl = parse_secs(SESSION_TTL_KEY, &raw)?;
        }

        Ok(config)
    }
}

pub fn parse_backend_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl {
        key: BACKEND_URL_KEY,
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl {
            key: BACKEND_URL_KEY,
            reason: format!("expected an http(s) base url, got {raw}"),
        });
    }
    Ok(url)
}

fn parse_secs(key: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidNumber {
            key,
            value: raw.to_string(),
        }),
    }
}
