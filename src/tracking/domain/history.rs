//! Append-only status change audit records.

use super::{TaskStatus, UserId};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// One audit entry capturing a single applied status transition.
///
/// Records are immutable once created; only the task aggregate appends them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChangeRecord {
    from_status: TaskStatus,
    to_status: TaskStatus,
    changed_by: UserId,
    changed_at: DateTime<Utc>,
    reason: Option<String>,
    duration_ms: i64,
}

impl StatusChangeRecord {
    pub(crate) const fn new(
        from_status: TaskStatus,
        to_status: TaskStatus,
        changed_by: UserId,
        changed_at: DateTime<Utc>,
        reason: Option<String>,
        duration_ms: i64,
    ) -> Self {
        Self {
            from_status,
            to_status,
            changed_by,
            changed_at,
            reason,
            duration_ms,
        }
    }

    /// Status the task held before this change.
    #[must_use]
    pub const fn from_status(&self) -> TaskStatus {
        self.from_status
    }

    /// Status the task moved to.
    #[must_use]
    pub const fn to_status(&self) -> TaskStatus {
        self.to_status
    }

    /// Identity that triggered the change.
    #[must_use]
    pub const fn changed_by(&self) -> &UserId {
        &self.changed_by
    }

    /// When the change was applied.
    #[must_use]
    pub const fn changed_at(&self) -> DateTime<Utc> {
        self.changed_at
    }

    /// Caller-supplied reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Milliseconds the task spent in `from_status` before this change.
    #[must_use]
    pub const fn duration_ms(&self) -> i64 {
        self.duration_ms
    }

    /// Time the task spent in `from_status` before this change.
    #[must_use]
    pub const fn duration(&self) -> TimeDelta {
        TimeDelta::milliseconds(self.duration_ms)
    }
}
