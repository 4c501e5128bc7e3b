//! SQLite repository implementations.

mod testimony_repository;

pub use testimony_repository::SqliteTestimonyRepository;
