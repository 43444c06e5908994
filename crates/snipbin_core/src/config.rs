//! Configuration loading from environment variables.

use crate::constants::{
    DEFAULT_HOST, DEFAULT_MAX_SNIPPET_SIZE, DEFAULT_PORT, DEFAULT_REAP_INTERVAL_SECS,
    DEFAULT_RETENTION_SECS,
};
use crate::error::ConfigError;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration for snipbin.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub verbose: bool,
    /// How long a saved snippet stays retrievable. Feeds both the advisory
    /// `timeExpired` field and the store TTL.
    pub retention: Duration,
    pub db_path: String,
    pub max_snippet_size: usize,
    pub reap_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            verbose: false,
            retention: Duration::from_secs(DEFAULT_RETENTION_SECS),
            db_path: default_db_path(),
            max_snippet_size: DEFAULT_MAX_SNIPPET_SIZE,
            reap_interval: Duration::from_secs(DEFAULT_REAP_INTERVAL_SECS),
        }
    }
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: String) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = resolve_home_dir() {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir() -> Option<PathBuf> {
    for key in ["HOME", "USERPROFILE"] {
        if let Ok(home) = env::var(key) {
            if !home.trim().is_empty() {
                return Some(PathBuf::from(home));
            }
        }
    }
    env::current_dir().ok()
}

fn default_db_path() -> String {
    let home = resolve_home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".cache")
        .join("snipbin")
        .join("db")
        .to_string_lossy()
        .to_string()
}

/// Parse a boolean-like flag value.
///
/// Truthy: `1`, `true`, `yes`, `on`. Falsy: `0`, `false`, `no`, `off`, empty.
/// Matching is case-insensitive and ignores surrounding whitespace.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a duration such as `90`, `90s`, `15m`, `72h`, `7d` or `1h30m`.
///
/// A bare number is read as seconds.
pub fn parse_duration(value: &str) -> Result<Duration, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("empty duration".to_string());
    }
    if let Ok(secs) = trimmed.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let mut total: u64 = 0;
    let mut digits = String::new();
    for ch in trimmed.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        let unit = match ch {
            's' => 1,
            'm' => 60,
            'h' => 60 * 60,
            'd' => 24 * 60 * 60,
            other => return Err(format!("unknown unit '{}'", other)),
        };
        let amount: u64 = digits
            .parse()
            .map_err(|_| format!("missing amount before '{}'", ch))?;
        digits.clear();
        total = amount
            .checked_mul(unit)
            .and_then(|secs| total.checked_add(secs))
            .ok_or_else(|| "duration overflows".to_string())?;
    }
    if !digits.is_empty() {
        return Err(format!("trailing amount '{}' has no unit", digits));
    }
    Ok(Duration::from_secs(total))
}

fn read_var(key: &'static str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn positive_duration(key: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    let Some(raw) = read_var(key) else {
        return Ok(default);
    };
    let parsed = parse_duration(&raw).map_err(|reason| invalid(key, &raw, reason))?;
    if parsed.is_zero() {
        return Err(invalid(key, &raw, "must be greater than zero"));
    }
    Ok(parsed)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Missing variables fall back to defaults; present but unparseable ones
    /// are rejected.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] when a value cannot be parsed or a
    /// duration is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match read_var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|err| invalid("PORT", &raw, format!("{}", err)))?,
            None => defaults.port,
        };
        let verbose = match read_var("VERBOSE") {
            Some(raw) => parse_env_flag(&raw)
                .ok_or_else(|| invalid("VERBOSE", &raw, "expected a boolean flag"))?,
            None => defaults.verbose,
        };
        let max_snippet_size = match read_var("MAX_SNIPPET_SIZE") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(0) => return Err(invalid("MAX_SNIPPET_SIZE", &raw, "must be greater than zero")),
                Ok(size) => size,
                Err(err) => return Err(invalid("MAX_SNIPPET_SIZE", &raw, format!("{}", err))),
            },
            None => defaults.max_snippet_size,
        };

        Ok(Self {
            host: read_var("HOST")
                .map(|host| host.trim().to_string())
                .unwrap_or(defaults.host),
            port,
            verbose,
            retention: positive_duration("SNIPPET_RETENTION_TIME", defaults.retention)?,
            db_path: read_var("DB_PATH").map(expand_tilde).unwrap_or(defaults.db_path),
            max_snippet_size,
            reap_interval: positive_duration("REAP_INTERVAL", defaults.reap_interval)?,
        })
    }

    /// `host:port` string the server listens on.
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
