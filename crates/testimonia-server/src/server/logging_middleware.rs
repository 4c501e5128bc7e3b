//! HTTP request/response logging middleware.
//!
//! Assigns a correlation ID to every inbound request, logs arrival and
//! completion with latency and outcome classification, and (in development,
//! at debug threshold) logs sanitized request details. Completion logic runs
//! after the handler produces its response but before the response is handed
//! back to the transport; the original response bytes are passed through
//! unchanged.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use testimonia_core::LogLevel;

use crate::logging::{
    self, generate_request_id, ErrorRecord, HttpLogConfig, PerformanceSnapshot, RequestContext,
    RequestId, DROPPED_HEADERS,
};

/// Logging middleware for all routes.
///
/// Runs the rest of the stack exactly once per request and emits:
/// - one info entry on arrival,
/// - one info entry on completion (status, size, latency),
/// - one debug performance entry,
/// - one error entry when the status is 4xx/5xx or the response body fails.
pub async fn http_logging_middleware(
    State(config): State<Arc<HttpLogConfig>>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let started_at = Instant::now();
    let request_id = generate_request_id();

    let remote_ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown ip".to_string());

    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let ctx = RequestContext {
        request_id: request_id.clone(),
        method: request.method().to_string(),
        url: request.uri().to_string(),
        remote_ip,
        user_agent,
        started_at,
    };

    // Downstream handlers can read the correlation ID from extensions.
    request.extensions_mut().insert(RequestId(request_id));

    if LogLevel::Info.should_log(config.threshold) {
        info!("{}", logging::format_request_line(&ctx));
    }

    let request = if config.development && LogLevel::Debug.should_log(config.threshold) {
        log_request_details(request, &ctx).await?
    } else {
        request
    };

    let response = next.run(request).await;

    // Collect the response so completion is observed before transmission.
    // A body failure here is the response-stream error path.
    let (parts, body) = response.into_parts();
    let body_bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            error!("{}", ErrorRecord::from_error(&ctx, &e).render());
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let status = parts.status.as_u16();
    let content_length = parts
        .headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());
    let elapsed_ms = ctx.elapsed_ms();

    if LogLevel::Info.should_log(config.threshold) {
        info!(
            "{}",
            logging::format_response_line(&ctx, status, content_length, elapsed_ms)
        );
    }

    if LogLevel::Debug.should_log(config.threshold) {
        debug!("Performance: {}", PerformanceSnapshot::capture(elapsed_ms).render());
    }

    if status >= 400 {
        error!("{}", ErrorRecord::from_status(&ctx, status, elapsed_ms).render());
    }

    Ok(Response::from_parts(parts, Body::from(body_bytes)))
}

/// Development-only detail logging: sanitized body, query map, and headers.
/// Buffers the request body and reconstructs the request.
async fn log_request_details(
    request: Request,
    ctx: &RequestContext,
) -> Result<Request, StatusCode> {
    let (parts, body) = request.into_parts();
    let body_bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!("[{}] Failed to read request body: {}", ctx.request_id, e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    if !body_bytes.is_empty() {
        debug!("Request body: {}", render_body(&body_bytes));
    }

    if let Some(query) = parts.uri.query() {
        let params = query_map(query);
        if !params.as_object().map(|m| m.is_empty()).unwrap_or(true) {
            debug!("Query params: {}", logging::sanitize(&params));
        }
    }

    debug!("Headers: {}", logging::sanitize(&header_map(&parts.headers)));

    Ok(Request::from_parts(parts, Body::from(body_bytes)))
}

/// Render a request body for logging: sanitized JSON when it parses,
/// truncated text when it is UTF-8, a byte count otherwise.
fn render_body(bytes: &[u8]) -> String {
    if let Ok(json) = serde_json::from_slice::<Value>(bytes) {
        return logging::sanitize(&json).to_string();
    }

    match std::str::from_utf8(bytes) {
        Ok(text) if text.chars().count() <= 200 => text.to_string(),
        Ok(text) => {
            let truncated: String = text.chars().take(200).collect();
            format!("{truncated}...")
        }
        Err(_) => format!("[binary: {} bytes]", bytes.len()),
    }
}

/// Parse a query string into a JSON map (later duplicates win).
fn query_map(query: &str) -> Value {
    let mut map = serde_json::Map::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        map.insert(key.into_owned(), Value::String(value.into_owned()));
    }
    Value::Object(map)
}

/// Request headers as a JSON map, with `authorization` and `cookie` dropped
/// outright rather than redacted.
fn header_map(headers: &HeaderMap) -> Value {
    let mut map = serde_json::Map::new();
    for (name, value) in headers {
        if DROPPED_HEADERS.contains(&name.as_str()) {
            continue;
        }
        map.insert(
            name.as_str().to_string(),
            Value::String(value.to_str().unwrap_or("<non-utf8>").to_string()),
        );
    }
    Value::Object(map)
}
