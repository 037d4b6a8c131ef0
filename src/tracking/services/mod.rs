//! Application services for status tracking orchestration.

mod tracking;

pub use tracking::{
    ChangeStatusRequest, StatusChangeSummary, StatusTrackingError, StatusTrackingResult,
    StatusTrackingService, TaskStatistics,
};
