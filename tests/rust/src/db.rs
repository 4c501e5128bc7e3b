//! Test database helpers.

use testimonia_storage::Database;

/// Fresh in-memory database with all migrations applied.
pub struct TestDatabase {
    pub db: Database,
}

impl TestDatabase {
    pub fn new() -> Self {
        Self {
            db: Database::open_in_memory().expect("Failed to open in-memory database"),
        }
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}
