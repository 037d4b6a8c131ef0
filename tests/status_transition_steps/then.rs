//! Then steps for status transition BDD scenarios.

use super::world::{StatusChangeWorld, run_async};
use rstest_bdd_macros::then;
use tasktrack::tracking::{
    domain::{Task, TaskId, TaskStatus, TransitionError},
    services::StatusTrackingError,
};

fn current_task_id(world: &StatusChangeWorld) -> Result<TaskId, eyre::Report> {
    world
        .current_task
        .as_ref()
        .map(Task::id)
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
}

fn last_transition_error(
    world: &StatusChangeWorld,
) -> Result<&TransitionError, eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing change result in scenario world"))?;
    match result {
        Err(StatusTrackingError::Transition(error)) => Ok(error),
        other => Err(eyre::eyre!("expected a denied transition, got {other:?}")),
    }
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &StatusChangeWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;

    let task = world
        .current_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task"))?;
    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            task.status()
        ));
    }
    Ok(())
}

#[then("the change is rejected because the edge is not allowed")]
fn rejected_invalid_edge(world: &StatusChangeWorld) -> Result<(), eyre::Report> {
    let error = last_transition_error(world)?;
    if !matches!(error, TransitionError::InvalidTransition { .. }) {
        return Err(eyre::eyre!("expected InvalidTransition, got {error:?}"));
    }
    Ok(())
}

#[then("the change is rejected for a missing permission")]
fn rejected_missing_permission(world: &StatusChangeWorld) -> Result<(), eyre::Report> {
    let error = last_transition_error(world)?;
    if !matches!(error, TransitionError::PermissionDenied { .. }) {
        return Err(eyre::eyre!("expected PermissionDenied, got {error:?}"));
    }
    Ok(())
}

#[then("the change is rejected for a missing reason")]
fn rejected_missing_reason(world: &StatusChangeWorld) -> Result<(), eyre::Report> {
    let error = last_transition_error(world)?;
    if !matches!(error, TransitionError::MissingReason) {
        return Err(eyre::eyre!("expected MissingReason, got {error:?}"));
    }
    Ok(())
}

#[then("the change is rejected because the task is finished")]
fn rejected_immutable(world: &StatusChangeWorld) -> Result<(), eyre::Report> {
    let error = last_transition_error(world)?;
    if !matches!(error, TransitionError::ImmutableState { .. }) {
        return Err(eyre::eyre!("expected ImmutableState, got {error:?}"));
    }
    Ok(())
}

#[then("the status history has {count:usize} entries")]
fn history_has_entries(world: &StatusChangeWorld, count: usize) -> Result<(), eyre::Report> {
    let task_id = current_task_id(world)?;
    let history = run_async(world.service.status_history(task_id))?;
    if history.len() != count {
        return Err(eyre::eyre!(
            "expected {count} history entries, found {}",
            history.len()
        ));
    }
    Ok(())
}

#[then("the task progress is {percent:u8} percent")]
fn task_progress_is(world: &StatusChangeWorld, percent: u8) -> Result<(), eyre::Report> {
    let task_id = current_task_id(world)?;
    let reported = run_async(world.service.progress_percentage(task_id))?;
    if reported != percent {
        return Err(eyre::eyre!("expected {percent}% progress, found {reported}%"));
    }
    Ok(())
}
