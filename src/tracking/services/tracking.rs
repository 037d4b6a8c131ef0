//! Status tracking service: the single orchestration path for status
//! changes plus read-only projections over the audit history.

use crate::tracking::{
    domain::{StatusChangeRecord, Task, TaskId, TaskStatus, TransitionError, UserId},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for changing a task's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeStatusRequest {
    task_id: TaskId,
    new_status: TaskStatus,
    acting_user: UserId,
    reason: Option<String>,
}

impl ChangeStatusRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub const fn new(task_id: TaskId, new_status: TaskStatus, acting_user: UserId) -> Self {
        Self {
            task_id,
            new_status,
            acting_user,
            reason: None,
        }
    }

    /// Attaches a reason (mandatory when blocking a task).
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Service-level errors for status tracking operations.
#[derive(Debug, Error)]
pub enum StatusTrackingError {
    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The transition policy denied the change.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for status tracking service operations.
pub type StatusTrackingResult<T> = Result<T, StatusTrackingError>;

/// Read-only aggregate over a task's status history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStatistics {
    /// Number of status changes ever applied.
    pub total_changes: usize,
    /// Status the task currently holds.
    pub current_status: TaskStatus,
    /// Live time spent in the current status so far.
    pub time_in_current_status: TimeDelta,
    /// Sum of all recorded durations.
    pub total_time: TimeDelta,
    /// Time spent per status, including the live share of the current one.
    pub status_breakdown: BTreeMap<TaskStatus, TimeDelta>,
}

/// One flattened history entry across a user's tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChangeSummary {
    /// Task the change belongs to.
    pub task_id: TaskId,
    /// Title of that task.
    pub task_title: String,
    /// Status the task held before the change.
    pub from_status: TaskStatus,
    /// Status the task moved to.
    pub to_status: TaskStatus,
    /// Identity that triggered the change.
    pub changed_by: UserId,
    /// When the change was applied.
    pub changed_at: DateTime<Utc>,
    /// Caller-supplied reason, if any.
    pub reason: Option<String>,
}

/// Status tracking orchestration service.
///
/// Stateless apart from its injected repository and clock; an in-memory
/// repository substitutes for the database in tests.
#[derive(Clone)]
pub struct StatusTrackingService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> StatusTrackingService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Versioned-write retries before a conflict is surfaced to the caller.
    const MAX_CONFLICT_RETRIES: u32 = 3;

    /// Creates a new status tracking service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Applies a status change and persists the task atomically.
    ///
    /// The read-validate-append-write sequence re-runs in full when the
    /// versioned write reports a conflict, up to a fixed retry budget. A
    /// policy denial is terminal for the call; the caller must re-submit
    /// with corrected inputs.
    ///
    /// # Errors
    ///
    /// Returns [`StatusTrackingError::NotFound`] for an unknown task,
    /// [`StatusTrackingError::Transition`] when the policy denies the
    /// change, or [`StatusTrackingError::Repository`] when persistence
    /// fails (including an exhausted conflict-retry budget).
    pub async fn change_status(&self, request: ChangeStatusRequest) -> StatusTrackingResult<Task> {
        let ChangeStatusRequest {
            task_id,
            new_status,
            acting_user,
            reason,
        } = request;

        let mut retries_left = Self::MAX_CONFLICT_RETRIES;
        loop {
            let mut task = self.load(task_id).await?;
            task.apply_status_change(new_status, &acting_user, reason.clone(), &*self.clock)?;

            match self.repository.update(&task).await {
                Ok(()) => return Ok(task),
                Err(TaskRepositoryError::VersionConflict(_)) if retries_left > 0 => {
                    retries_left -= 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Returns the task's status change history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StatusTrackingError::NotFound`] for an unknown task.
    pub async fn status_history(
        &self,
        task_id: TaskId,
    ) -> StatusTrackingResult<Vec<StatusChangeRecord>> {
        let task = self.load(task_id).await?;
        Ok(task.status_history().to_vec())
    }

    /// Returns the time the task has spent in its current status.
    #[must_use]
    pub fn current_status_duration(&self, task: &Task) -> TimeDelta {
        task.time_in_current_status(&*self.clock)
    }

    /// Computes aggregate statistics over the task's history.
    ///
    /// The breakdown sums recorded durations per prior status, then adds
    /// the live time spent in the current status; `total_time` covers the
    /// recorded durations only.
    ///
    /// # Errors
    ///
    /// Returns [`StatusTrackingError::NotFound`] for an unknown task.
    pub async fn statistics(&self, task_id: TaskId) -> StatusTrackingResult<TaskStatistics> {
        let task = self.load(task_id).await?;

        let mut breakdown_ms: BTreeMap<TaskStatus, i64> = BTreeMap::new();
        let mut total_ms: i64 = 0;
        for record in task.status_history() {
            *breakdown_ms.entry(record.from_status()).or_insert(0) += record.duration_ms();
            total_ms += record.duration_ms();
        }

        let time_in_current_status = task.time_in_current_status(&*self.clock);
        *breakdown_ms.entry(task.status()).or_insert(0) +=
            time_in_current_status.num_milliseconds();

        Ok(TaskStatistics {
            total_changes: task.status_history().len(),
            current_status: task.status(),
            time_in_current_status,
            total_time: TimeDelta::milliseconds(total_ms),
            status_breakdown: breakdown_ms
                .into_iter()
                .map(|(status, ms)| (status, TimeDelta::milliseconds(ms)))
                .collect(),
        })
    }

    /// Maps the task's status to its ordinal progress (0–100).
    ///
    /// A blocked task reports progress as of the status it was blocked
    /// from, defaulting to `pending` when no history exists.
    ///
    /// # Errors
    ///
    /// Returns [`StatusTrackingError::NotFound`] for an unknown task.
    pub async fn progress_percentage(&self, task_id: TaskId) -> StatusTrackingResult<u8> {
        let task = self.load(task_id).await?;
        Ok(task
            .status()
            .progress_percent()
            .map_or_else(|| blocked_progress(&task), |percent| percent))
    }

    /// Returns the statuses legally reachable from the task's current one.
    ///
    /// # Errors
    ///
    /// Returns [`StatusTrackingError::NotFound`] for an unknown task.
    pub async fn valid_next_statuses(
        &self,
        task_id: TaskId,
    ) -> StatusTrackingResult<Vec<TaskStatus>> {
        let task = self.load(task_id).await?;
        Ok(task.valid_next_statuses().to_vec())
    }

    /// Returns the user's tasks in the given status, most recently updated
    /// first.
    ///
    /// A task belongs to a user when they are its creator or its assignee.
    ///
    /// # Errors
    ///
    /// Returns [`StatusTrackingError::Repository`] when the lookup fails.
    pub async fn tasks_by_status(
        &self,
        user: &UserId,
        status: TaskStatus,
    ) -> StatusTrackingResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .repository
            .find_for_user(user)
            .await?
            .into_iter()
            .filter(|task| task.status() == status)
            .collect();
        tasks.sort_by_key(|task| std::cmp::Reverse(task.updated_at()));
        Ok(tasks)
    }

    /// Flattens the history of the user's tasks into recent-first change
    /// summaries, truncated to `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`StatusTrackingError::Repository`] when the lookup fails.
    pub async fn recent_status_changes(
        &self,
        user: &UserId,
        limit: usize,
    ) -> StatusTrackingResult<Vec<StatusChangeSummary>> {
        let tasks = self.repository.find_for_user(user).await?;

        let mut summaries: Vec<StatusChangeSummary> = tasks
            .iter()
            .flat_map(|task| {
                task.status_history()
                    .iter()
                    .map(|record| summarize(task, record))
            })
            .collect();
        summaries.sort_by_key(|summary| std::cmp::Reverse(summary.changed_at));
        summaries.truncate(limit);
        Ok(summaries)
    }

    async fn load(&self, task_id: TaskId) -> StatusTrackingResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(StatusTrackingError::NotFound(task_id))
    }
}

fn blocked_progress(task: &Task) -> u8 {
    task.status_history()
        .last()
        .map_or(TaskStatus::Pending, StatusChangeRecord::from_status)
        .progress_percent()
        .unwrap_or(0)
}

fn summarize(task: &Task, record: &StatusChangeRecord) -> StatusChangeSummary {
    StatusChangeSummary {
        task_id: task.id(),
        task_title: task.title().to_owned(),
        from_status: record.from_status(),
        to_status: record.to_status(),
        changed_by: record.changed_by().clone(),
        changed_at: record.changed_at(),
        reason: record.reason().map(str::to_owned),
    }
}
