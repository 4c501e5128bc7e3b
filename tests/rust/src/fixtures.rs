//! Test data fixtures.

use testimonia_core::{CreateTestimony, Testimony};

pub fn create_dto(full_name: &str) -> CreateTestimony {
    CreateTestimony {
        full_name: full_name.to_string(),
        phone: "+1-555-0100".to_string(),
        topic: "gratitude".to_string(),
    }
}

pub fn test_testimony(full_name: &str) -> Testimony {
    Testimony::new(create_dto(full_name))
}
