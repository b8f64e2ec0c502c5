//! Client configuration parsed from environment variables.

use std::path::PathBuf;

use crate::model::Coordinates;

pub const DEFAULT_BASE_URL: &str = "http://170.64.225.223:8080";
pub const DEFAULT_APP_ID: &str = "com.example.fooddeliveryapp";
pub const DEFAULT_DATA_DIR: &str = ".foodhub";
pub const DEFAULT_SESSION_NAMESPACE: &str = "foodhub_session";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid FOODHUB_BASE_URL '{0}' (expected http:// or https://)")]
    InvalidBaseUrl(String),
    #[error("invalid FOODHUB_SESSION_NAMESPACE '{0}'")]
    InvalidNamespace(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API root without a trailing slash.
    pub base_url: String,
    /// Distribution channel identifier; decides the default role and is sent
    /// as `X-Package-Name`.
    pub app_id: String,
    pub data_dir: PathBuf,
    pub session_namespace: String,
    pub timeouts: HttpTimeouts,
    pub default_location: Coordinates,
    /// Whether fixture-backed listings wait their artificial delay.
    pub simulated_latency: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            app_id: DEFAULT_APP_ID.to_owned(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            session_namespace: DEFAULT_SESSION_NAMESPACE.to_owned(),
            timeouts: HttpTimeouts {
                request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            },
            default_location: Coordinates::NEW_YORK,
            simulated_latency: true,
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// All optional:
    /// - `FOODHUB_BASE_URL`: API root (default `http://170.64.225.223:8080`)
    /// - `FOODHUB_APP_ID`: distribution channel id (default `com.example.fooddeliveryapp`)
    /// - `FOODHUB_DATA_DIR`: directory for session files (default `.foodhub`)
    /// - `FOODHUB_SESSION_NAMESPACE`: session file name (default `foodhub_session`)
    /// - `FOODHUB_REQUEST_TIMEOUT_SECS`: default 30
    /// - `FOODHUB_CONNECT_TIMEOUT_SECS`: default 10
    /// - `FOODHUB_DEFAULT_LAT` / `FOODHUB_DEFAULT_LON`: restaurant search origin
    /// - `FOODHUB_SIMULATED_LATENCY`: `true` (default) or `false`
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let base_url = match std::env::var("FOODHUB_BASE_URL") {
            Ok(raw) => parse_base_url(&raw)?,
            Err(_) => defaults.base_url,
        };
        let app_id = std::env::var("FOODHUB_APP_ID")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.app_id);
        let data_dir = std::env::var("FOODHUB_DATA_DIR").map_or(defaults.data_dir, PathBuf::from);
        let session_namespace = match std::env::var("FOODHUB_SESSION_NAMESPACE") {
            Ok(raw) => parse_namespace(&raw)?,
            Err(_) => defaults.session_namespace,
        };
        let timeouts = HttpTimeouts {
            request_secs: env_parse("FOODHUB_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse("FOODHUB_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        let default_location = Coordinates {
            latitude: env_parse("FOODHUB_DEFAULT_LAT", defaults.default_location.latitude),
            longitude: env_parse("FOODHUB_DEFAULT_LON", defaults.default_location.longitude),
        };
        let simulated_latency = env_bool("FOODHUB_SIMULATED_LATENCY").unwrap_or(defaults.simulated_latency);

        Ok(Self { base_url, app_id, data_dir, session_namespace, timeouts, default_location, simulated_latency })
    }
}

pub fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.trim_end_matches('/').to_owned())
}

pub(crate) fn parse_namespace(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let valid = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
        && !trimmed.starts_with('.');
    if !valid {
        return Err(ConfigError::InvalidNamespace(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
