//! `PostgreSQL` repository implementation for task status storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::tracking::{
    domain::{PersistedTaskData, StatusChangeRecord, Task, TaskId, TaskStatus, UserId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_new_row(task)?;
        let expected_prior = row
            .version
            .checked_sub(1)
            .ok_or(TaskRepositoryError::VersionConflict(task_id))?;

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                tasks::table.filter(
                    tasks::id
                        .eq(task_id.into_inner())
                        .and(tasks::version.eq(expected_prior)),
                ),
            )
            .set((
                tasks::title.eq(&row.title),
                tasks::assigned_to.eq(&row.assigned_to),
                tasks::status.eq(&row.status),
                tasks::status_history.eq(&row.status_history),
                tasks::started_at.eq(row.started_at),
                tasks::completed_at.eq(row.completed_at),
                tasks::updated_at.eq(row.updated_at),
                tasks::version.eq(row.version),
            ))
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;

            if affected > 0 {
                return Ok(());
            }

            // Zero rows means either the task is gone or the version moved;
            // a follow-up existence check tells the two apart.
            let exists = diesel::select(diesel::dsl::exists(
                tasks::table.filter(tasks::id.eq(task_id.into_inner())),
            ))
            .get_result::<bool>(connection)
            .map_err(TaskRepositoryError::persistence)?;

            if exists {
                Err(TaskRepositoryError::VersionConflict(task_id))
            } else {
                Err(TaskRepositoryError::NotFound(task_id))
            }
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_for_user(&self, user: &UserId) -> TaskRepositoryResult<Vec<Task>> {
        let identity = user.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(
                    tasks::created_by
                        .eq(&identity)
                        .or(tasks::assigned_to.eq(&identity)),
                )
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let status_history =
        serde_json::to_value(task.status_history()).map_err(TaskRepositoryError::persistence)?;
    let version = i64::try_from(task.version()).map_err(TaskRepositoryError::persistence)?;

    Ok(NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        created_by: task.created_by().as_str().to_owned(),
        assigned_to: task.assigned_to().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        status_history,
        created_at: task.created_at(),
        started_at: task.started_at(),
        completed_at: task.completed_at(),
        updated_at: task.updated_at(),
        version,
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        created_by,
        assigned_to,
        status,
        status_history,
        created_at,
        started_at,
        completed_at,
        updated_at,
        version,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        created_by: UserId::new(created_by).map_err(TaskRepositoryError::persistence)?,
        assigned_to: UserId::new(assigned_to).map_err(TaskRepositoryError::persistence)?,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?,
        status_history: serde_json::from_value::<Vec<StatusChangeRecord>>(status_history)
            .map_err(TaskRepositoryError::persistence)?,
        created_at,
        started_at,
        completed_at,
        updated_at,
        version: u64::try_from(version).map_err(TaskRepositoryError::persistence)?,
    };
    Ok(Task::from_persisted(data))
}
