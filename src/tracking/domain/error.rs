//! Error types for tracking domain validation, policy verdicts, and parsing.

use super::TaskStatus;
use std::fmt;
use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The user identity is empty after trimming.
    #[error("user identity must not be empty")]
    EmptyUserId,
}

/// Relationship to the task a denied actor would have needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredRole {
    /// The user recorded as the task creator.
    Creator,
    /// The user the task is currently assigned to.
    Assignee,
}

impl RequiredRole {
    /// Returns the role as a string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Creator => "creator",
            Self::Assignee => "assignee",
        }
    }
}

impl fmt::Display for RequiredRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Policy verdicts denying a requested status transition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// The requested edge is not in the adjacency table.
    #[error("cannot change status from {from} to {to}; valid next statuses: {}", join_statuses(.allowed))]
    InvalidTransition {
        /// Status the task currently holds.
        from: TaskStatus,
        /// Status that was requested.
        to: TaskStatus,
        /// Statuses legally reachable from the current one.
        allowed: &'static [TaskStatus],
    },

    /// The task is in a terminal status and can no longer change.
    #[error("task is {status} and can no longer change status")]
    ImmutableState {
        /// The terminal status the task holds.
        status: TaskStatus,
    },

    /// The acting user lacks the relationship the target status requires.
    #[error("only the task {required_role} may move the task to {to}")]
    PermissionDenied {
        /// Status that was requested.
        to: TaskStatus,
        /// Relationship the actor would have needed.
        required_role: RequiredRole,
    },

    /// Entering the blocked status without a reason.
    #[error("a reason is required when blocking a task")]
    MissingReason,
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

fn join_statuses(statuses: &[TaskStatus]) -> String {
    statuses
        .iter()
        .map(|status| status.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
