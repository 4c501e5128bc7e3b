//! # Testimonia Core Library
//!
//! Domain logic, configuration, and data access traits for Testimonia.
//!
//! ## Modules
//!
//! - `config` - Runtime configuration resolved from the process environment
//! - `domain` - Core entities (Testimony)
//! - `repository` - Data access traits implemented by the storage layer
//! - `style` - ANSI styling helpers shared by the log formatters

pub mod config;
pub mod domain;
pub mod repository;
pub mod style;

// Re-export commonly used types
pub use config::{AppConfig, Environment, LogLevel};
pub use domain::*;
pub use repository::TestimonyRepository;
