//! Domain model for task status tracking.
//!
//! The tracking domain models the status state machine, the pure transition
//! policy, the append-only status change history, and the task aggregate
//! that ties them together, keeping all infrastructure concerns outside of
//! the domain boundary.

mod error;
mod history;
mod ids;
pub mod policy;
mod status;
mod task;

pub use error::{ParseTaskStatusError, RequiredRole, TaskDomainError, TransitionError};
pub use history::StatusChangeRecord;
pub use ids::{TaskId, UserId};
pub use policy::TransitionContext;
pub use status::TaskStatus;
pub use task::{PersistedTaskData, Task};
