//! When steps for status transition BDD scenarios.

use super::world::{StatusChangeWorld, run_async};
use rstest_bdd_macros::when;
use tasktrack::tracking::{
    domain::{TaskStatus, UserId},
    services::ChangeStatusRequest,
};

fn request_change(
    world: &mut StatusChangeWorld,
    user: String,
    status: String,
    reason: Option<String>,
) -> Result<(), eyre::Report> {
    let task = world
        .current_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let requested = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;

    let mut request = ChangeStatusRequest::new(task.id(), requested, UserId::new(user)?);
    if let Some(text) = reason {
        request = request.with_reason(text);
    }

    let result = run_async(world.service.change_status(request));
    if let Ok(ref updated) = result {
        world.current_task = Some(updated.clone());
    }
    world.last_result = Some(result);
    Ok(())
}

#[when("{user:string} moves the task to {status:string}")]
fn move_task(
    world: &mut StatusChangeWorld,
    user: String,
    status: String,
) -> Result<(), eyre::Report> {
    request_change(world, user, status, None)
}

#[when("{user:string} moves the task to {status:string} citing {reason:string}")]
fn move_task_with_reason(
    world: &mut StatusChangeWorld,
    user: String,
    status: String,
    reason: String,
) -> Result<(), eyre::Report> {
    request_change(world, user, status, Some(reason))
}
