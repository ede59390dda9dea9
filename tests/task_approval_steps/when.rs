//! When steps for task approval BDD scenarios.

use super::world::{ApprovalWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskdesk::task::services::SubmitTaskRequest;

#[when("an assignee submits the task")]
fn assignee_submits(world: &mut ApprovalWorld) -> Result<(), eyre::Report> {
    let task_id = world.single_task()?;
    let employee = world
        .staff()?
        .employees
        .first()
        .copied()
        .ok_or_else(|| eyre::eyre!("team has no employees"))?;
    run_async(
        world
            .portal()?
            .tasks
            .submit_task(SubmitTaskRequest::new(task_id, employee).with_remarks("Done")),
    )
    .wrap_err("submit task")?;
    Ok(())
}

#[when("an assignee submits tasks {first:usize} and {second:usize}")]
fn assignee_submits_some(
    world: &mut ApprovalWorld,
    first: usize,
    second: usize,
) -> Result<(), eyre::Report> {
    let employee = world
        .staff()?
        .employees
        .last()
        .copied()
        .ok_or_else(|| eyre::eyre!("team has no employees"))?;
    for position in [first, second] {
        let task_id = position
            .checked_sub(1)
            .and_then(|index| world.tasks.get(index))
            .copied()
            .ok_or_else(|| eyre::eyre!("no task number {position}"))?;
        run_async(
            world
                .portal()?
                .tasks
                .submit_task(SubmitTaskRequest::new(task_id, employee)),
        )
        .wrap_err_with(|| format!("submit task {position}"))?;
    }
    Ok(())
}

#[when(r#"the administrator rejects the task with remarks "{remarks}""#)]
fn administrator_rejects(world: &mut ApprovalWorld, remarks: String) -> Result<(), eyre::Report> {
    review(world, Some(remarks))
}

#[when("the administrator rejects the task without remarks")]
fn administrator_rejects_blank(world: &mut ApprovalWorld) -> Result<(), eyre::Report> {
    review(world, Some(String::new()))
}

#[when("the administrator approves the task")]
fn administrator_approves(world: &mut ApprovalWorld) -> Result<(), eyre::Report> {
    review(world, None)
}

#[when("the administrator approves every task")]
fn administrator_approves_all(world: &mut ApprovalWorld) -> Result<(), eyre::Report> {
    let admin = world.staff()?.admin;
    let outcome = run_async(world.portal()?.tasks.approve_tasks(&world.tasks, admin))
        .wrap_err("bulk approve tasks")?;
    world.last_bulk = Some(outcome);
    Ok(())
}

/// Approves the scenario task, or rejects it when `remarks` is given.
fn review(world: &mut ApprovalWorld, remarks: Option<String>) -> Result<(), eyre::Report> {
    let task_id = world.single_task()?;
    let admin = world.staff()?.admin;
    let tasks = &world.portal()?.tasks;
    let result = match remarks {
        Some(reason) => run_async(tasks.reject_task(task_id, admin, &reason)),
        None => run_async(tasks.approve_task(task_id, admin)),
    };
    world.last_review = Some(result);
    Ok(())
}
