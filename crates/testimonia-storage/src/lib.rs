//! # Testimonia Storage Layer
//!
//! SQLite database with sequential embedded migrations and statement-level
//! SQL logging.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 Application                  │
//! ├──────────────────────────────────────────────┤
//! │             Repository Traits                │
//! │            (TestimonyRepository)             │
//! ├──────────────────────────────────────────────┤
//! │           SQLite Implementations             │
//! │         (SqliteTestimonyRepository)          │
//! ├──────────────────────────────────────────────┤
//! │                  Database                    │
//! │        (SQLite + optional SQL logging)       │
//! └──────────────────────────────────────────────┘
//! ```

mod database;
mod repositories;
pub mod sql_log;

pub use database::Database;
pub use repositories::SqliteTestimonyRepository;
