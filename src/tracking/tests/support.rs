//! Shared fixtures and a manually advanced clock for engine tests.

use crate::tracking::domain::{Task, TaskDomainError, UserId};
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use std::sync::{Mutex, PoisonError};

/// Clock that only moves when a test advances it.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock frozen at the given instant.
    pub const fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Instant all manual-clock tests start from.
pub fn fixed_start() -> Result<DateTime<Utc>, chrono::ParseError> {
    Ok(DateTime::parse_from_rfc3339("2026-01-15T09:00:00Z")?.with_timezone(&Utc))
}

/// Validated user identity for test actors.
pub fn user(name: &str) -> Result<UserId, TaskDomainError> {
    UserId::new(name)
}

/// Task created by alice and assigned to bob, starting in pending.
pub fn sample_task(clock: &impl Clock) -> Result<Task, TaskDomainError> {
    Task::new("Ship the release notes", user("alice")?, user("bob")?, clock)
}
