//! Service layer: business logic orchestration.
//!
//! [`NotebookService`] validates input, runs each mutation in its own
//! transaction, and logs what changed.

pub mod notebook_service;

pub use notebook_service::{NotebookService, TagWrite};
