//! Wiring of every service over one shared entity store.

use crate::announcement::services::AnnouncementService;
use crate::directory::services::DirectoryService;
use crate::store::{ports::SnapshotRepository, services::EntityStore};
use crate::task::services::{TaskInsightsService, TaskLifecycleService};
use crate::timesheet::services::TimesheetService;
use mockable::Clock;
use std::sync::Arc;

/// The services of one portal instance.
///
/// Every service shares the same [`EntityStore`] and clock.
#[derive(Clone)]
pub struct Portal<R, C>
where
    R: SnapshotRepository,
    C: Clock + Send + Sync,
{
    /// Shared store.
    pub store: Arc<EntityStore<R>>,
    /// Shared clock.
    pub clock: Arc<C>,
    /// Users and teams.
    pub directory: DirectoryService<R, C>,
    /// Task lifecycle and approvals.
    pub tasks: TaskLifecycleService<R, C>,
    /// Dashboards and analytics.
    pub insights: TaskInsightsService<R>,
    /// Announcement board.
    pub announcements: AnnouncementService<R, C>,
    /// Time logging.
    pub timesheets: TimesheetService<R, C>,
}

impl<R, C> Portal<R, C>
where
    R: SnapshotRepository,
    C: Clock + Send + Sync,
{
    /// Builds every service over `store`.
    #[must_use]
    pub fn new(store: Arc<EntityStore<R>>, clock: Arc<C>) -> Self {
        Self {
            directory: DirectoryService::new(Arc::clone(&store), Arc::clone(&clock)),
            tasks: TaskLifecycleService::new(Arc::clone(&store), Arc::clone(&clock)),
            insights: TaskInsightsService::new(Arc::clone(&store)),
            announcements: AnnouncementService::new(Arc::clone(&store), Arc::clone(&clock)),
            timesheets: TimesheetService::new(Arc::clone(&store), Arc::clone(&clock)),
            store,
            clock,
        }
    }
}
