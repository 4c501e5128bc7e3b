//! HTTP log formatting, classification, and redaction.
//!
//! Pure helpers consumed by the logging middleware. Classification (status
//! class, latency class, size buckets) is the contract; the colors attached
//! to each class are cosmetic.

use serde::Serialize;
use serde_json::Value;

use testimonia_core::style::{paint, BLUE, CYAN, GRAY, GREEN, MAGENTA, RED, WHITE, YELLOW};

use super::RequestContext;

/// Replacement for sensitive values in logged payloads.
pub const REDACTION_MARKER: &str = "[REDACTED]";

/// Headers removed outright before the general sanitization pass.
pub const DROPPED_HEADERS: &[&str] = &["authorization", "cookie"];

/// Any key whose lowercase form contains one of these substrings is redacted.
const SENSITIVE_FIELDS: &[&str] = &["password", "token", "authorization", "secret", "key"];

/// Recursion guard for [`sanitize`]. Request payloads are expected to be
/// shallow; anything deeper is replaced wholesale.
const MAX_SANITIZE_DEPTH: usize = 32;

// ── Classification ────────────────────────────────────────────────────────

/// Outcome class of a response status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Informational,
    Success,
    Redirect,
    ClientError,
    ServerError,
}

impl StatusClass {
    pub fn classify(status: u16) -> Self {
        match status {
            s if s >= 500 => StatusClass::ServerError,
            s if s >= 400 => StatusClass::ClientError,
            s if s >= 300 => StatusClass::Redirect,
            s if s >= 200 => StatusClass::Success,
            _ => StatusClass::Informational,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            StatusClass::ServerError => RED,
            StatusClass::ClientError => YELLOW,
            StatusClass::Redirect => CYAN,
            StatusClass::Success => GREEN,
            StatusClass::Informational => GRAY,
        }
    }
}

/// Latency bucket for a completed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyClass {
    Fast,
    Moderate,
    Slow,
}

impl LatencyClass {
    pub fn classify(elapsed_ms: u64) -> Self {
        if elapsed_ms < 100 {
            LatencyClass::Fast
        } else if elapsed_ms < 500 {
            LatencyClass::Moderate
        } else {
            LatencyClass::Slow
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            LatencyClass::Fast => GREEN,
            LatencyClass::Moderate => YELLOW,
            LatencyClass::Slow => RED,
        }
    }
}

/// Display color for an HTTP method; unrecognized verbs get a neutral one.
pub fn method_color(method: &str) -> &'static str {
    match method.to_ascii_uppercase().as_str() {
        "GET" => BLUE,
        "POST" => GREEN,
        "PUT" => YELLOW,
        "DELETE" => RED,
        "PATCH" => MAGENTA,
        _ => GRAY,
    }
}

/// Human-readable size: absent → "0b", then bytes / kilobytes / megabytes
/// with one decimal place.
pub fn format_content_length(content_length: Option<u64>) -> String {
    match content_length {
        None => "0b".to_string(),
        Some(size) if size < 1024 => format!("{size}b"),
        Some(size) if size < 1024 * 1024 => format!("{:.1}kb", size as f64 / 1024.0),
        Some(size) => format!("{:.1}mb", size as f64 / (1024.0 * 1024.0)),
    }
}

// ── Line rendering ────────────────────────────────────────────────────────

/// Request-arrival line: `[id] METHOD url | ip | user-agent`.
pub fn format_request_line(ctx: &RequestContext) -> String {
    [
        paint(GRAY, &format!("[{}]", ctx.request_id)),
        paint(method_color(&ctx.method), &ctx.method),
        paint(WHITE, &ctx.url),
        paint(GRAY, "|"),
        paint(GRAY, &ctx.remote_ip),
        paint(GRAY, "|"),
        paint(GRAY, &ctx.user_agent),
    ]
    .join(" ")
}

/// Completion line: `[id] METHOD status url size elapsed | ip`.
pub fn format_response_line(
    ctx: &RequestContext,
    status: u16,
    content_length: Option<u64>,
    elapsed_ms: u64,
) -> String {
    [
        paint(GRAY, &format!("[{}]", ctx.request_id)),
        paint(method_color(&ctx.method), &ctx.method),
        paint(StatusClass::classify(status).color(), &status.to_string()),
        paint(WHITE, &ctx.url),
        paint(GRAY, &format_content_length(content_length)),
        paint(
            LatencyClass::classify(elapsed_ms).color(),
            &format!("{elapsed_ms}ms"),
        ),
        paint(GRAY, "|"),
        paint(GRAY, &ctx.remote_ip),
    ]
    .join(" ")
}

// ── Redaction ─────────────────────────────────────────────────────────────

/// Whether a payload key must have its value redacted.
pub fn is_sensitive_field(key: &str) -> bool {
    let key = key.to_lowercase();
    SENSITIVE_FIELDS.iter().any(|field| key.contains(field))
}

/// Return a copy of `value` with sensitive fields replaced by
/// [`REDACTION_MARKER`], recursively. The input is never mutated.
pub fn sanitize(value: &Value) -> Value {
    sanitize_at(value, 0)
}

fn sanitize_at(value: &Value, depth: usize) -> Value {
    if depth >= MAX_SANITIZE_DEPTH {
        return Value::String(REDACTION_MARKER.to_string());
    }

    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, val)| {
                    if is_sensitive_field(key) {
                        (key.clone(), Value::String(REDACTION_MARKER.to_string()))
                    } else {
                        (key.clone(), sanitize_at(val, depth + 1))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => {
            Value::Array(items.iter().map(|v| sanitize_at(v, depth + 1)).collect())
        }
        other => other.clone(),
    }
}

// ── Records ───────────────────────────────────────────────────────────────

/// Structured error entry for failed requests and transport errors.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    pub request_id: String,
    pub method: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
}

impl ErrorRecord {
    /// Message used when no error object is available.
    pub const DEFAULT_MESSAGE: &'static str = "Request failed";

    /// Record for a completed response with an error status code.
    pub fn from_status(ctx: &RequestContext, status: u16, elapsed_ms: u64) -> Self {
        Self {
            message: Self::DEFAULT_MESSAGE.to_string(),
            stack: None,
            request_id: ctx.request_id.clone(),
            method: ctx.method.clone(),
            url: ctx.url.clone(),
            status_code: Some(status),
            response_time_ms: Some(elapsed_ms),
        }
    }

    /// Record for an error raised on the response stream.
    pub fn from_error(ctx: &RequestContext, error: &dyn std::fmt::Display) -> Self {
        let message = error.to_string();
        Self {
            message: if message.is_empty() {
                Self::DEFAULT_MESSAGE.to_string()
            } else {
                message
            },
            stack: None,
            request_id: ctx.request_id.clone(),
            method: ctx.method.clone(),
            url: ctx.url.clone(),
            status_code: None,
            response_time_ms: None,
        }
    }

    /// Render to a single log-friendly line; degrades to the default message
    /// rather than propagating a serialization failure.
    pub fn render(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| Self::DEFAULT_MESSAGE.to_string())
    }
}

/// Best-effort process resource usage attached to debug completion entries.
/// Counters unavailable on the current platform are omitted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSnapshot {
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rss_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vm_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_user_ticks: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_system_ticks: Option<u64>,
}

impl PerformanceSnapshot {
    pub fn capture(response_time_ms: u64) -> Self {
        let (vm_bytes, rss_bytes) = read_memory();
        let (cpu_user_ticks, cpu_system_ticks) = read_cpu();
        Self {
            response_time_ms,
            rss_bytes,
            vm_bytes,
            cpu_user_ticks,
            cpu_system_ticks,
        }
    }

    pub fn render(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| format!("{{\"responseTimeMs\":{}}}", self.response_time_ms))
    }
}

#[cfg(target_os = "linux")]
fn read_memory() -> (Option<u64>, Option<u64>) {
    let Ok(statm) = std::fs::read_to_string("/proc/self/statm") else {
        return (None, None);
    };
    let mut fields = statm.split_whitespace();
    let vm_pages: Option<u64> = fields.next().and_then(|f| f.parse().ok());
    let rss_pages: Option<u64> = fields.next().and_then(|f| f.parse().ok());
    // statm reports pages
    let page_size = 4096;
    (
        vm_pages.map(|p| p * page_size),
        rss_pages.map(|p| p * page_size),
    )
}

#[cfg(not(target_os = "linux"))]
fn read_memory() -> (Option<u64>, Option<u64>) {
    (None, None)
}

#[cfg(target_os = "linux")]
fn read_cpu() -> (Option<u64>, Option<u64>) {
    let Ok(stat) = std::fs::read_to_string("/proc/self/stat") else {
        return (None, None);
    };
    // utime and stime are fields 14 and 15; skip past the parenthesized comm
    // field, which may itself contain spaces.
    let Some(rest) = stat.rsplit_once(')').map(|(_, rest)| rest) else {
        return (None, None);
    };
    let fields: Vec<&str> = rest.split_whitespace().collect();
    let utime = fields.get(11).and_then(|f| f.parse().ok());
    let stime = fields.get(12).and_then(|f| f.parse().ok());
    (utime, stime)
}

#[cfg(not(target_os = "linux"))]
fn read_cpu() -> (Option<u64>, Option<u64>) {
    (None, None)
}
