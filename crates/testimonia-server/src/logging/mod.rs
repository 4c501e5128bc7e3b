//! Request-scoped logging: correlation IDs, formatting, and redaction.

mod http_log;
mod request_context;

pub use http_log::{
    format_content_length, format_request_line, format_response_line, is_sensitive_field,
    method_color, sanitize, ErrorRecord, LatencyClass, PerformanceSnapshot, StatusClass,
    DROPPED_HEADERS, REDACTION_MARKER,
};
pub use request_context::{generate_request_id, RequestContext, RequestId};

use testimonia_core::{AppConfig, LogLevel};

/// Resolved settings consumed by the logging middleware.
///
/// Built once at startup and injected; read-only for the process lifetime.
#[derive(Debug, Clone)]
pub struct HttpLogConfig {
    /// Enables verbose request detail logging (body, query, headers).
    pub development: bool,
    /// Minimum severity at which entries are emitted.
    pub threshold: LogLevel,
}

impl HttpLogConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            development: config.environment.is_development(),
            threshold: config.log_level,
        }
    }
}
