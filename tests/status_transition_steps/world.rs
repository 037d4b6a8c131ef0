//! Shared world state for status transition BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasktrack::tracking::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{StatusTrackingError, StatusTrackingService},
};

/// Service type used by the BDD world.
pub type TestTrackingService = StatusTrackingService<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for status transition behaviour tests.
pub struct StatusChangeWorld {
    pub repository: Arc<InMemoryTaskRepository>,
    pub service: TestTrackingService,
    pub current_task: Option<Task>,
    pub last_result: Option<Result<Task, StatusTrackingError>>,
}

impl StatusChangeWorld {
    /// Creates a world with empty pending scenario state.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryTaskRepository::new());
        let service =
            StatusTrackingService::new(Arc::clone(&repository), Arc::new(DefaultClock));

        Self {
            repository,
            service,
            current_task: None,
            last_result: None,
        }
    }
}

impl Default for StatusChangeWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> StatusChangeWorld {
    StatusChangeWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
