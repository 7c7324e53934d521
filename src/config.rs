//! Native client configuration parsed from environment variables.

use std::time::Duration;

use crate::errors::AgentError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_LOCALE: &str = "en-US";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub api_base_url: String,
    pub auth_token: Option<String>,
    pub locale: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl AgentConfig {
    /// Build typed config from the process environment.
    ///
    /// Optional:
    /// - `ZURT_API_BASE_URL`: default `http://localhost:3000/api`
    /// - `ZURT_AUTH_TOKEN`: sent as a bearer token when set and non-blank
    /// - `ZURT_LOCALE`: active locale tag, default `en-US`
    /// - `ZURT_REQUEST_TIMEOUT_SECS`: default 60
    /// - `ZURT_CONNECT_TIMEOUT_SECS`: default 10
    pub fn from_env() -> Result<Self, AgentError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AgentConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AgentError> {
        let api_base_url = lookup("ZURT_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let auth_token = lookup("ZURT_AUTH_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        let locale = lookup("ZURT_LOCALE")
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        let request_timeout = parse_secs(&lookup, "ZURT_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        let connect_timeout = parse_secs(&lookup, "ZURT_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?;

        Ok(Self { api_base_url, auth_token, locale, request_timeout, connect_timeout })
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            auth_token: None,
            locale: DEFAULT_LOCALE.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

fn parse_secs(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<Duration, AgentError> {
    match lookup(key) {
        None => Ok(Duration::from_secs(default)),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(0) => Err(AgentError::Config { key: key.to_string(), message: "must be greater than zero".into() }),
            Ok(secs) => Ok(Duration::from_secs(secs)),
            Err(e) => Err(AgentError::Config { key: key.to_string(), message: e.to_string() }),
        },
    }
}
