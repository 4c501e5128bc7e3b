//! Core domain entities.

pub mod testimony;

pub use testimony::{CreateTestimony, Testimony, TestimonyStatus};
