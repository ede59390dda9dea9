//! Then steps for task approval BDD scenarios.

use super::world::{ApprovalWorld, run_async};
use rstest_bdd_macros::then;
use taskdesk::task::domain::{TaskDomainError, TaskStatus};
use taskdesk::task::services::TaskLifecycleError;

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &ApprovalWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task_id = world.single_task()?;
    let task = run_async(world.portal()?.tasks.get_task(task_id))
        .ok_or_else(|| eyre::eyre!("task {task_id} no longer exists"))?;

    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            task.status()
        ));
    }
    Ok(())
}

#[then("the task history has {count:usize} entries")]
fn history_has_entries(world: &ApprovalWorld, count: usize) -> Result<(), eyre::Report> {
    let task_id = world.single_task()?;
    let history = run_async(world.portal()?.tasks.task_history(task_id));

    if history.len() != count {
        return Err(eyre::eyre!(
            "expected {count} history entries, found {}",
            history.len()
        ));
    }
    Ok(())
}

#[then(r#"the newest history entry has remarks "{remarks}""#)]
fn newest_entry_has_remarks(world: &ApprovalWorld, remarks: String) -> Result<(), eyre::Report> {
    let task_id = world.single_task()?;
    let history = run_async(world.portal()?.tasks.task_history(task_id));
    let newest = history
        .first()
        .ok_or_else(|| eyre::eyre!("task has no history"))?;

    if newest.remarks() != Some(remarks.as_str()) {
        return Err(eyre::eyre!(
            "expected remarks {remarks:?}, found {:?}",
            newest.remarks()
        ));
    }
    Ok(())
}

#[then(r#"the latest submission is "{status}""#)]
fn latest_submission_is(world: &ApprovalWorld, status: String) -> Result<(), eyre::Report> {
    let task_id = world.single_task()?;
    let submission = run_async(world.portal()?.tasks.latest_submission(task_id))
        .ok_or_else(|| eyre::eyre!("task has no submission"))?;
    let actual = submission.status();

    if actual.as_str() != status {
        return Err(eyre::eyre!(
            "expected submission status {status}, found {}",
            actual.as_str()
        ));
    }
    Ok(())
}

#[then("the review fails with a validation error")]
fn review_fails_validation(world: &ApprovalWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_review
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing review result"))?;

    if !matches!(
        result,
        Err(TaskLifecycleError::Validation(
            TaskDomainError::EmptyRejectionRemarks
        ))
    ) {
        return Err(eyre::eyre!(
            "expected EmptyRejectionRemarks error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("{approved:usize} tasks are approved and {skipped:usize} is skipped")]
fn bulk_outcome_counts(
    world: &ApprovalWorld,
    approved: usize,
    skipped: usize,
) -> Result<(), eyre::Report> {
    let outcome = world
        .last_bulk
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing bulk outcome"))?;
    let still_pending = run_async(world.portal()?.tasks.pending_approvals());

    if outcome.changed.len() != approved || outcome.skipped.len() != skipped {
        return Err(eyre::eyre!(
            "expected {approved} approved and {skipped} skipped, got {outcome:?}"
        ));
    }
    if !still_pending.is_empty() {
        return Err(eyre::eyre!("{} tasks still await approval", still_pending.len()));
    }
    let skipped_statuses: Vec<TaskStatus> = outcome
        .skipped
        .iter()
        .filter_map(|task_id| run_async(world.portal().ok()?.tasks.get_task(*task_id)))
        .map(|task| task.status())
        .collect();
    if skipped_statuses != vec![TaskStatus::YetToStart; skipped] {
        return Err(eyre::eyre!(
            "skipped tasks changed status: {skipped_statuses:?}"
        ));
    }
    Ok(())
}
