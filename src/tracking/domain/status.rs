//! Task status values and the canonical transition adjacency table.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been created but is not yet ready to be worked on.
    Pending,
    /// Task is ready for the assignee to pick up.
    Ready,
    /// Task is being worked on.
    InProgress,
    /// Task is awaiting review.
    Review,
    /// Task is blocked on something outside the assignee's control.
    Blocked,
    /// Task has been completed.
    Done,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ready => "ready",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Blocked => "blocked",
            Self::Done => "done",
        }
    }

    /// Returns the statuses legally reachable from this one.
    ///
    /// This table is canonical: `review` does not return to `ready`, and
    /// `done` has no outgoing edges.
    #[must_use]
    pub const fn allowed_transitions(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Ready],
            Self::Ready => &[Self::InProgress, Self::Blocked],
            Self::InProgress => &[Self::Review, Self::Blocked],
            Self::Review => &[Self::Done, Self::InProgress],
            Self::Blocked => &[Self::Ready, Self::InProgress],
            Self::Done => &[],
        }
    }

    /// Returns `true` when the target status is adjacent to this one.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        self.allowed_transitions().contains(&target)
    }

    /// Returns `true` when no outgoing transitions exist.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }

    /// Ordinal progress of this status in the non-blocked sequence.
    ///
    /// Returns `None` for [`TaskStatus::Blocked`]: a blocked task reports
    /// progress as of the status it was blocked from.
    #[must_use]
    pub const fn progress_percent(self) -> Option<u8> {
        match self {
            Self::Pending => Some(0),
            Self::Ready => Some(25),
            Self::InProgress => Some(50),
            Self::Review => Some(75),
            Self::Done => Some(100),
            Self::Blocked => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "ready" => Ok(Self::Ready),
            "in_progress" => Ok(Self::InProgress),
            "review" => Ok(Self::Review),
            "blocked" => Ok(Self::Blocked),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
