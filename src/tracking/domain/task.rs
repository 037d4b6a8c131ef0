//! Task aggregate root: the single mutation path for status changes.

use super::{
    StatusChangeRecord, TaskDomainError, TaskId, TaskStatus, TransitionContext, TransitionError,
    UserId, policy,
};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// The status field and its history can only change through
/// [`Task::apply_status_change`]; history is append-only and every applied
/// change bumps the optimistic-concurrency version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    created_by: UserId,
    assigned_to: UserId,
    status: TaskStatus,
    status_history: Vec<StatusChangeRecord>,
    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
    version: u64,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted task title.
    pub title: String,
    /// Persisted creator identity.
    pub created_by: UserId,
    /// Persisted assignee identity.
    pub assigned_to: UserId,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted status change history.
    pub status_history: Vec<StatusChangeRecord>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted first-work timestamp, if work has started.
    pub started_at: Option<DateTime<Utc>>,
    /// Persisted completion timestamp, if the task finished.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted latest change timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted optimistic-concurrency version.
    pub version: u64,
}

impl Task {
    /// Creates a new task in [`TaskStatus::Pending`] with empty history.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is empty or
    /// whitespace-only after trimming.
    pub fn new(
        title: impl Into<String>,
        created_by: UserId,
        assigned_to: UserId,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let raw_title = title.into();
        let normalized = raw_title.trim();
        if normalized.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            title: normalized.to_owned(),
            created_by,
            assigned_to,
            status: TaskStatus::Pending,
            status_history: Vec::new(),
            created_at: timestamp,
            started_at: None,
            completed_at: None,
            updated_at: timestamp,
            version: 0,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            created_by: data.created_by,
            assigned_to: data.assigned_to,
            status: data.status,
            status_history: data.status_history,
            created_at: data.created_at,
            started_at: data.started_at,
            completed_at: data.completed_at,
            updated_at: data.updated_at,
            version: data.version,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the creator identity.
    #[must_use]
    pub const fn created_by(&self) -> &UserId {
        &self.created_by
    }

    /// Returns the assignee identity.
    #[must_use]
    pub const fn assigned_to(&self) -> &UserId {
        &self.assigned_to
    }

    /// Returns the current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the append-only status change history, oldest first.
    #[must_use]
    pub fn status_history(&self) -> &[StatusChangeRecord] {
        &self.status_history
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when work first started, if it has.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Returns when the task was first completed, if it has been.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the latest change timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the optimistic-concurrency version.
    ///
    /// The version equals the number of status changes ever applied.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the statuses legally reachable from the current one.
    #[must_use]
    pub const fn valid_next_statuses(&self) -> &'static [TaskStatus] {
        self.status.allowed_transitions()
    }

    /// Returns when the task entered its current status.
    ///
    /// Falls back to the creation timestamp when no change has been applied.
    #[must_use]
    pub fn last_change_at(&self) -> DateTime<Utc> {
        self.status_history
            .last()
            .map_or(self.created_at, StatusChangeRecord::changed_at)
    }

    /// Returns the time the task has spent in its current status.
    #[must_use]
    pub fn time_in_current_status(&self, clock: &impl Clock) -> TimeDelta {
        clock.utc().signed_duration_since(self.last_change_at())
    }

    /// Applies a status change on behalf of `actor`.
    ///
    /// Evaluates the transition policy, computes the time spent in the prior
    /// status, appends the audit record, updates the current status and the
    /// derived timestamps, and bumps the version. On denial nothing is
    /// mutated.
    ///
    /// # Errors
    ///
    /// Returns the [`TransitionError`] verdict when the policy denies the
    /// transition.
    pub fn apply_status_change(
        &mut self,
        requested: TaskStatus,
        actor: &UserId,
        reason: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), TransitionError> {
        policy::evaluate(&TransitionContext {
            current: self.status,
            requested,
            actor,
            created_by: &self.created_by,
            assigned_to: &self.assigned_to,
            reason: reason.as_deref(),
        })?;

        let now = clock.utc();
        let duration_ms = now
            .signed_duration_since(self.last_change_at())
            .num_milliseconds()
            .max(0);

        self.status_history.push(StatusChangeRecord::new(
            self.status,
            requested,
            actor.clone(),
            now,
            reason,
            duration_ms,
        ));
        self.status = requested;

        // started_at and completed_at record the first entry only.
        if requested == TaskStatus::InProgress && self.started_at.is_none() {
            self.started_at = Some(now);
        }
        if requested == TaskStatus::Done && self.completed_at.is_none() {
            self.completed_at = Some(now);
        }

        self.updated_at = now;
        self.version += 1;
        Ok(())
    }
}
