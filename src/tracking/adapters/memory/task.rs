//! Thread-safe in-memory task repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::tracking::{
    domain::{Task, TaskId, UserId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// In-memory task repository backed by a `RwLock`-guarded map.
///
/// Versioned writes compare-and-swap under the write lock, giving the same
/// conflict semantics as the database adapter.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.state.write().map_err(lock_poisoned)?;
        if tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.state.write().map_err(lock_poisoned)?;
        let stored = tasks
            .get(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;

        let expected_prior = task
            .version()
            .checked_sub(1)
            .ok_or(TaskRepositoryError::VersionConflict(task.id()))?;
        if stored.version() != expected_prior {
            return Err(TaskRepositoryError::VersionConflict(task.id()));
        }

        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let tasks = self.state.read().map_err(lock_poisoned)?;
        Ok(tasks.get(&id).cloned())
    }

    async fn find_for_user(&self, user: &UserId) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.state.read().map_err(lock_poisoned)?;
        Ok(tasks
            .values()
            .filter(|task| task.created_by() == user || task.assigned_to() == user)
            .cloned()
            .collect())
    }
}
