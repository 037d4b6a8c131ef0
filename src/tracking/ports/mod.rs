//! Port contracts for the tracking module.

mod repository;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
