//! Diesel schema for task status persistence.

diesel::table! {
    /// Task records with embedded status change history.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title owned by surrounding functionality.
        #[max_length = 255]
        title -> Varchar,
        /// Creator identity.
        #[max_length = 255]
        created_by -> Varchar,
        /// Assignee identity.
        #[max_length = 255]
        assigned_to -> Varchar,
        /// Current lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Append-only status change history.
        status_history -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// First time the task entered in_progress.
        started_at -> Nullable<Timestamptz>,
        /// First time the task entered done.
        completed_at -> Nullable<Timestamptz>,
        /// Latest change timestamp.
        updated_at -> Timestamptz,
        /// Optimistic-concurrency version.
        version -> Int8,
    }
}
