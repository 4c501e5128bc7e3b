//! Runtime configuration resolved from the process environment.
//!
//! All values are read once at startup and are immutable for the lifetime of
//! the process. Unsupported values never fail startup; they fall back to the
//! documented defaults instead.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

/// Log severity, ordered from most to least verbose.
///
/// A configured threshold gates emission: a message at level `L` is emitted
/// iff `L >= threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Default threshold when `LOG_LEVEL` is unset or invalid.
    pub const DEFAULT: LogLevel = LogLevel::Info;

    /// Whether a message at `self` passes the configured `threshold`.
    pub fn should_log(self, threshold: LogLevel) -> bool {
        self >= threshold
    }

    /// Parse a level name, falling back to [`LogLevel::DEFAULT`] on unknown input.
    pub fn parse_or_default(value: &str) -> LogLevel {
        value.parse().unwrap_or_else(|_| {
            warn!("Unknown LOG_LEVEL '{}', falling back to 'info'", value);
            Self::DEFAULT
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown log level: {0}")]
pub struct ParseLogLevelError(String);

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(ParseLogLevelError(other.to_string())),
        }
    }
}

/// Deployment environment.
///
/// Only the literal name `development` enables development behavior (verbose
/// request logging, SQL statement logging); anything else is treated as
/// production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn from_env_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("development") {
            Environment::Development
        } else {
            Environment::Production
        }
    }

    pub fn is_development(self) -> bool {
        self == Environment::Development
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub log_level: LogLevel,
    pub port: u16,
    pub database_path: PathBuf,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// Recognized variables: `APP_ENV`, `LOG_LEVEL`, `PORT`, `DATABASE_PATH`.
    pub fn from_env() -> Self {
        let environment = std::env::var("APP_ENV")
            .map(|v| Environment::from_env_name(&v))
            .unwrap_or_default();

        let log_level = std::env::var("LOG_LEVEL")
            .map(|v| LogLevel::parse_or_default(&v))
            .unwrap_or(LogLevel::DEFAULT);

        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8080);

        let database_path = std::env::var("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/testimonia.db"));

        Self {
            environment,
            log_level,
            port,
            database_path,
        }
    }
}
