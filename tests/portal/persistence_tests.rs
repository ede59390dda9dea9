//! Reopening a portal stored in a JSON document.

use super::helpers::{TickingClock, open_portal, staff};
use camino::Utf8Path;
use eyre::{OptionExt, ensure};
use rstest::{fixture, rstest};
use std::sync::Arc;
use taskdesk::store::{
    adapters::JsonFileSnapshotRepository, domain::PortalSnapshot, services::EntityStore,
};
use taskdesk::task::domain::TaskStatus;
use taskdesk::task::services::SubmitTaskRequest;
use tempfile::TempDir;

const DOCUMENT: &str = "portal.json";

#[fixture]
fn store_dir() -> TempDir {
    tempfile::tempdir().unwrap_or_else(|err| panic!("create temporary directory: {err}"))
}

fn repository(dir: &TempDir) -> eyre::Result<Arc<JsonFileSnapshotRepository>> {
    let path = Utf8Path::from_path(dir.path()).ok_or_eyre("temporary path is not UTF-8")?;
    Ok(Arc::new(JsonFileSnapshotRepository::open(path, DOCUMENT)?))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reopened_portal_sees_committed_workflow(store_dir: TempDir) -> eyre::Result<()> {
    let office = staff(open_portal(repository(&store_dir)?).await?).await?;
    office
        .portal
        .tasks
        .submit_task(SubmitTaskRequest::new(office.task, office.employee))
        .await?;
    office
        .portal
        .tasks
        .reject_task(office.task, office.admin, "attach the ledger")
        .await?;
    let before = office.portal.store.snapshot().await;

    let reopened = open_portal(repository(&store_dir)?).await?;

    ensure!(reopened.store.snapshot().await == before);
    let task = reopened
        .tasks
        .get_task(office.task)
        .await
        .ok_or_eyre("task missing after reopen")?;
    ensure!(task.status() == TaskStatus::InProgress);
    let history = reopened.tasks.task_history(office.task).await;
    ensure!(history.first().and_then(|entry| entry.remarks()) == Some("attach the ledger"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn demo_data_is_written_once(store_dir: TempDir) -> eyre::Result<()> {
    let demo = PortalSnapshot::demo(&TickingClock::default())?;
    let seeded = EntityStore::open_with_default(repository(&store_dir)?, || demo).await?;
    let seeded_users = seeded.snapshot().await.users.len();

    let reopened = EntityStore::open_with_default(repository(&store_dir)?, PortalSnapshot::empty)
        .await?;

    ensure!(seeded_users == 6);
    ensure!(reopened.snapshot().await == seeded.snapshot().await);
    Ok(())
}
