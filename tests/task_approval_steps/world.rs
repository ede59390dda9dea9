//! Shared world state for task approval BDD scenarios.

use std::sync::Arc;

use taskdesk::directory::domain::{TeamId, UserId};
use taskdesk::portal::Portal;
use taskdesk::store::{adapters::InMemorySnapshotRepository, services::EntityStore};
use taskdesk::task::{
    domain::{Task, TaskId},
    services::{BulkOutcome, TaskLifecycleError},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Portal type used by the BDD world.
pub type TestPortal = Portal<InMemorySnapshotRepository, DefaultClock>;

/// People registered by the scenario background.
pub struct Staff {
    pub admin: UserId,
    pub employees: Vec<UserId>,
    pub team: TeamId,
}

/// Scenario world for approval behaviour tests.
#[derive(Default)]
pub struct ApprovalWorld {
    pub portal: Option<TestPortal>,
    pub staff: Option<Staff>,
    pub tasks: Vec<TaskId>,
    pub last_review: Option<Result<Task, TaskLifecycleError>>,
    pub last_bulk: Option<BulkOutcome>,
}

impl ApprovalWorld {
    /// Opens an empty in-memory portal.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened.
    pub fn open_portal(&mut self) -> Result<(), eyre::Report> {
        let store = run_async(EntityStore::open(Arc::new(
            InMemorySnapshotRepository::new(),
        )))?;
        self.portal = Some(Portal::new(Arc::new(store), Arc::new(DefaultClock)));
        Ok(())
    }

    /// Returns the portal opened by the background step.
    ///
    /// # Errors
    ///
    /// Returns an error if no portal has been opened.
    pub fn portal(&self) -> Result<&TestPortal, eyre::Report> {
        self.portal
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing portal in scenario world"))
    }

    /// Returns the registered staff.
    ///
    /// # Errors
    ///
    /// Returns an error if no staff have been registered.
    pub fn staff(&self) -> Result<&Staff, eyre::Report> {
        self.staff
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing staff in scenario world"))
    }

    /// Returns the only task created by the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error unless exactly one task was created.
    pub fn single_task(&self) -> Result<TaskId, eyre::Report> {
        match self.tasks.as_slice() {
            [task] => Ok(*task),
            other => Err(eyre::eyre!("expected one task, found {}", other.len())),
        }
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ApprovalWorld {
    ApprovalWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
