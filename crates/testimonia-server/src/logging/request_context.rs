//! Per-request correlation context.

use std::time::Instant;

use rand::Rng;

const REQUEST_ID_LEN: usize = 12;
const REQUEST_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a short, unique request ID.
/// Format: 12 random base-36 characters (e.g., "k3x09qw1mz7a").
///
/// Not derived from request content; collisions across concurrent requests
/// are negligible at this length.
pub fn generate_request_id() -> String {
    let mut rng = rand::thread_rng();
    (0..REQUEST_ID_LEN)
        .map(|_| REQUEST_ID_ALPHABET[rng.gen_range(0..REQUEST_ID_ALPHABET.len())] as char)
        .collect()
}

/// Correlation ID stored in request extensions for downstream handlers.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Context for a single in-flight request.
///
/// Owned by the middleware invocation handling that request; discarded when
/// the response completes.
#[derive(Debug)]
pub struct RequestContext {
    pub request_id: String,
    pub method: String,
    pub url: String,
    pub remote_ip: String,
    pub user_agent: String,
    pub started_at: Instant,
}

impl RequestContext {
    /// Elapsed time since the request arrived.
    pub fn elapsed_ms(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }
}
