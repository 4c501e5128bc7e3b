//! # Testimonia Server
//!
//! HTTP server for the testimonies API:
//! - Request-scoped logging middleware with correlation IDs, latency
//!   measurement, outcome classification, and sensitive-data redaction
//! - Testimony submission and listing endpoints
//! - Health check

pub mod logging;
pub mod server;

pub use logging::HttpLogConfig;
pub use server::{build_router, serve, AppState, ServerConfig};
