//! Binary entry point: configuration, tracing, database, HTTP server.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use testimonia_core::AppConfig;
use testimonia_server::logging::HttpLogConfig;
use testimonia_server::server::{self, AppState, ServerConfig};
use testimonia_storage::{Database, SqliteTestimonyRepository};

/// Get the logs directory path (under the local data directory)
fn get_logs_dir() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("testimonia")
        .join("logs")
}

/// Initialize tracing with console and file logging
///
/// - Console: colored, compact format
/// - File: daily rotation under the local data directory
fn init_tracing(config: &AppConfig) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let logs_dir = get_logs_dir();
    if let Err(e) = std::fs::create_dir_all(&logs_dir) {
        eprintln!("Warning: Failed to create logs directory: {}", e);
    }

    // File appender with daily rotation
    // Creates files like: testimonia.2026-08-24.log
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("testimonia")
        .filename_suffix("log")
        .build(&logs_dir)
        .expect("Failed to create log file appender");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    // RUST_LOG takes precedence; otherwise the configured LOG_LEVEL drives
    // the process-wide filter so crate-local entries pass the subscriber.
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    // Console layer: colored, compact
    let console_layer = fmt::layer()
        .with_ansi(true)
        .compact()
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true);

    // File layer: no colors, include more detail
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    // Must be kept alive for the duration of the program
    guard
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    let _guard = init_tracing(&config);

    info!(
        "Starting testimonia {} ({:?}, log level {})",
        env!("CARGO_PKG_VERSION"),
        config.environment,
        config.log_level
    );

    let mut db = Database::open(&config.database_path)?;
    // SQL statement logging is disabled entirely in production
    if !config.environment.is_production() {
        db.enable_statement_logging();
    }
    let db = Arc::new(Mutex::new(db));

    let state = AppState {
        testimonies: Arc::new(SqliteTestimonyRepository::new(db)),
    };
    let log_config = Arc::new(HttpLogConfig::from_app_config(&config));

    let router = server::build_router(state, log_config);
    let server_config = ServerConfig {
        port: config.port,
        ..ServerConfig::default()
    };

    server::serve(&server_config, router).await
}
