//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Creator identity.
    pub created_by: String,
    /// Assignee identity.
    pub assigned_to: String,
    /// Current lifecycle status.
    pub status: String,
    /// Status change history JSON payload.
    pub status_history: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// First time the task entered in_progress.
    pub started_at: Option<DateTime<Utc>>,
    /// First time the task entered done.
    pub completed_at: Option<DateTime<Utc>>,
    /// Latest change timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optimistic-concurrency version.
    pub version: i64,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Creator identity.
    pub created_by: String,
    /// Assignee identity.
    pub assigned_to: String,
    /// Current lifecycle status.
    pub status: String,
    /// Status change history JSON payload.
    pub status_history: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// First time the task entered in_progress.
    pub started_at: Option<DateTime<Utc>>,
    /// First time the task entered done.
    pub completed_at: Option<DateTime<Utc>>,
    /// Latest change timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optimistic-concurrency version.
    pub version: i64,
}
