//! Given steps for status transition BDD scenarios.

use super::world::{StatusChangeWorld, run_async};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use tasktrack::tracking::{
    domain::{Task, TaskStatus, UserId},
    ports::TaskRepository,
    services::ChangeStatusRequest,
};

#[given(r#"a task "{title}" created by "{creator}" and assigned to "{assignee}""#)]
fn task_exists(
    world: &mut StatusChangeWorld,
    title: String,
    creator: String,
    assignee: String,
) -> Result<(), eyre::Report> {
    let task = Task::new(
        title,
        UserId::new(creator)?,
        UserId::new(assignee)?,
        &DefaultClock,
    )?;
    run_async(world.repository.insert(&task)).wrap_err("store task for scenario")?;
    world.current_task = Some(task);
    Ok(())
}

#[given(r#"the task has already been moved to "{status}" by "{user}""#)]
fn task_already_moved(
    world: &mut StatusChangeWorld,
    status: String,
    user: String,
) -> Result<(), eyre::Report> {
    let task = world
        .current_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let requested = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;

    let moved = run_async(world.service.change_status(ChangeStatusRequest::new(
        task.id(),
        requested,
        UserId::new(user)?,
    )))
    .wrap_err("move task in scenario setup")?;

    world.current_task = Some(moved);
    Ok(())
}
