//! Shared test utilities and fixtures for Testimonia integration tests.

pub mod capture;
pub mod db;
pub mod fixtures;

pub use capture::LogCapture;
pub use db::TestDatabase;
