//! Shared fixtures for portal integration tests.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::{Arc, Mutex, PoisonError};
use taskdesk::directory::domain::{Role, UserId};
use taskdesk::directory::services::RegisterUserRequest;
use taskdesk::portal::Portal;
use taskdesk::store::{
    adapters::InMemorySnapshotRepository, ports::SnapshotRepository, services::EntityStore,
};
use taskdesk::task::domain::{Assignment, TaskDetails, TaskId};
use taskdesk::task::services::CreateTaskRequest;

/// Clock that starts on Monday 2025-03-03 at 09:00 UTC and moves forward
/// one minute per reading.
#[derive(Debug)]
pub struct TickingClock {
    next: Mutex<DateTime<Utc>>,
}

impl Default for TickingClock {
    fn default() -> Self {
        let start = Utc
            .with_ymd_and_hms(2025, 3, 3, 9, 0, 0)
            .single()
            .unwrap_or_default();
        Self {
            next: Mutex::new(start),
        }
    }
}

impl Clock for TickingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().unwrap_or_else(PoisonError::into_inner);
        let now = *next;
        *next = now + TimeDelta::minutes(1);
        now
    }
}

/// Portal type over an arbitrary repository.
pub type TestPortal<R> = Portal<R, TickingClock>;

/// A portal with an administrator, one employee and one task assigned to
/// that employee.
pub struct Office<R: SnapshotRepository> {
    pub portal: TestPortal<R>,
    pub admin: UserId,
    pub employee: UserId,
    pub task: TaskId,
}

/// Opens a portal over `repository`.
///
/// # Errors
///
/// Returns an error if the repository cannot be loaded.
pub async fn open_portal<R: SnapshotRepository>(
    repository: Arc<R>,
) -> eyre::Result<TestPortal<R>> {
    let store = EntityStore::open(repository).await?;
    Ok(Portal::new(Arc::new(store), Arc::new(TickingClock::default())))
}

/// Registers the office staff and their first task.
///
/// # Errors
///
/// Returns an error if any registration or task creation fails.
pub async fn staff<R: SnapshotRepository>(portal: TestPortal<R>) -> eyre::Result<Office<R>> {
    let admin = portal
        .directory
        .register_user(RegisterUserRequest::new("Meera", "meera@firm.test", Role::Admin))
        .await?
        .id();
    let employee = portal
        .directory
        .register_user(RegisterUserRequest::new("Kiran", "kiran@firm.test", Role::Employee))
        .await?
        .id();
    let inward = portal.clock.utc();
    let due = inward.date_naive() + TimeDelta::days(10);
    let details = TaskDetails::new("ABC Pvt Ltd", inward, due, due - TimeDelta::days(2));
    let task = portal
        .tasks
        .create_task(
            CreateTaskRequest::new(details, Assignment::Employees(vec![employee])),
            admin,
        )
        .await?
        .id();
    Ok(Office {
        portal,
        admin,
        employee,
        task,
    })
}

/// An office over a fresh in-memory repository.
///
/// # Errors
///
/// Returns an error if the office cannot be staffed.
pub async fn in_memory_office() -> eyre::Result<Office<InMemorySnapshotRepository>> {
    let portal = open_portal(Arc::new(InMemorySnapshotRepository::new())).await?;
    staff(portal).await
}
