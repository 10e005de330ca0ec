//! Configuration handling for the relay.
//!
//! Values are read from environment variables with the same defaults the
//! chat plugin ships with. `Config::from_env` validates what it reads and
//! returns a `ConfigError` naming the offending field.

use std::env;
use thiserror::Error;

/// Environment variable names. Public so hosts and tests can refer to them.
pub const ENV_API_HOST: &str = "DOUYIN_API_HOST";
pub const ENV_MAX_DURATION: &str = "DOUYIN_MAX_DURATION";
pub const ENV_REPLY_TEMPLATE: &str = "DOUYIN_REPLY_TEMPLATE";
pub const ENV_LONG_VIDEO_TEMPLATE: &str = "DOUYIN_LONG_VIDEO_TEMPLATE";
pub const ENV_LOG_LEVEL: &str = "DOUYIN_LOG_LEVEL";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";

/// Default values used when environment variables are absent.
const DEFAULT_API_HOST: &str = "https://api.douyin.wtf";
const DEFAULT_MAX_DURATION_SECS: f64 = 90.0;
const DEFAULT_REPLY_TEMPLATE: &str = "抖音解析：\n{desc}";
const DEFAULT_LONG_VIDEO_TEMPLATE: &str = "视频过长~ 请打开抖音客户端查看";
const DEFAULT_LOG_LEVEL: u8 = 2;
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

const MAX_LOG_LEVEL: u8 = 3;

/// Relay runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    api_host: String,
    max_duration_secs: f64,
    reply_template: String,
    long_video_template: String,
    log_level: u8,
    bind_addr: String,
}

impl Config {
    /// Create a new config explicitly. The API host is validated the same
    /// way `from_env` validates it.
    pub fn new(
        api_host: impl Into<String>,
        max_duration_secs: f64,
        reply_template: impl Into<String>,
        long_video_template: impl Into<String>,
        log_level: u8,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            api_host: validate_api_host(&api_host.into())?,
            max_duration_secs,
            reply_template: reply_template.into(),
            long_video_template: long_video_template.into(),
            log_level: validate_log_level(log_level)?,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        })
    }

    /// Load from environment variables, falling back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_host = env::var(ENV_API_HOST).unwrap_or_else(|_| DEFAULT_API_HOST.to_string());
        let max_duration_secs = match env::var(ENV_MAX_DURATION) {
            Ok(raw) => parse_max_duration(&raw)?,
            Err(_) => DEFAULT_MAX_DURATION_SECS,
        };
        let reply_template = env::var(ENV_REPLY_TEMPLATE)
            .map(|t| unescape_newlines(&t))
            .unwrap_or_else(|_| DEFAULT_REPLY_TEMPLATE.to_string());
        let long_video_template = env::var(ENV_LONG_VIDEO_TEMPLATE)
            .map(|t| unescape_newlines(&t))
            .unwrap_or_else(|_| DEFAULT_LONG_VIDEO_TEMPLATE.to_string());
        let log_level = match env::var(ENV_LOG_LEVEL) {
            Ok(raw) => raw
                .trim()
                .parse::<u8>()
                .map_err(|_| ConfigError::InvalidValue {
                    field: "log_level",
                    reason: format!("expected an integer between 0 and {MAX_LOG_LEVEL}, got '{raw}'"),
                })?,
            Err(_) => DEFAULT_LOG_LEVEL,
        };
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            api_host: validate_api_host(&api_host)?,
            max_duration_secs,
            reply_template,
            long_video_template,
            log_level: validate_log_level(log_level)?,
            bind_addr,
        })
    }

    /// Resolution API prefix, never with a trailing slash.
    pub fn api_host(&self) -> &str {
        &self.api_host
    }
    /// Longest video (seconds) that is sent as a link. 0 disables the limit.
    /// Fractional limits are kept as given.
    pub fn max_duration_secs(&self) -> f64 {
        self.max_duration_secs
    }
    pub fn reply_template(&self) -> &str {
        &self.reply_template
    }
    pub fn long_video_template(&self) -> &str {
        &self.long_video_template
    }
    /// Verbosity gate, 0 (silent) through 3 (detail).
    pub fn log_level(&self) -> u8 {
        self.log_level
    }
    /// TCP bind address (host:port) for the HTTP host.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }

    /// Plugin defaults (mirrors `from_env` with no env overrides).
    pub fn default() -> Self {
        Self {
            api_host: DEFAULT_API_HOST.to_string(),
            max_duration_secs: DEFAULT_MAX_DURATION_SECS,
            reply_template: DEFAULT_REPLY_TEMPLATE.to_string(),
            long_video_template: DEFAULT_LONG_VIDEO_TEMPLATE.to_string(),
            log_level: DEFAULT_LOG_LEVEL,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

fn validate_api_host(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        field: "api_host",
        reason: e.to_string(),
    })?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ConfigError::InvalidValue {
            field: "api_host",
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(trimmed.to_string())
}

fn validate_log_level(level: u8) -> Result<u8, ConfigError> {
    if level > MAX_LOG_LEVEL {
        return Err(ConfigError::InvalidValue {
            field: "log_level",
            reason: format!("expected an integer between 0 and {MAX_LOG_LEVEL}, got {level}"),
        });
    }
    Ok(level)
}

/// Non-numeric values mean "no limit"; negative numbers are rejected.
fn parse_max_duration(raw: &str) -> Result<f64, ConfigError> {
    let raw = raw.trim();
    match raw.parse::<f64>() {
        Ok(value) if value < 0.0 => Err(ConfigError::InvalidValue {
            field: "max_duration",
            reason: format!("must not be negative, got '{raw}'"),
        }),
        Ok(value) if value.is_finite() => Ok(value),
        _ => Ok(0.0),
    }
}

fn unescape_newlines(raw: &str) -> String {
    raw.replace("\\n", "\n")
}
