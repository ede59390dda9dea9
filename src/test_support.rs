//! Shared fixtures for unit tests.

use crate::directory::domain::{Role, TeamId, UserId};
use crate::directory::services::RegisterUserRequest;
use crate::portal::Portal;
use crate::task::domain::TaskDetails;
use crate::store::{
    adapters::InMemorySnapshotRepository,
    domain::PortalSnapshot,
    ports::{SnapshotRepository, SnapshotRepositoryResult},
    services::EntityStore,
};
use chrono::{DateTime, Local, NaiveDate, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::{Arc, Mutex};

mockall::mock! {
    pub SnapshotRepository {}

    #[async_trait::async_trait]
    impl SnapshotRepository for SnapshotRepository {
        async fn load(&self) -> SnapshotRepositoryResult<Option<PortalSnapshot>>;
        async fn save(&self, snapshot: &PortalSnapshot) -> SnapshotRepositoryResult<()>;
    }
}

/// Clock that advances a fixed step on every reading.
#[derive(Debug)]
pub struct SteppingClock {
    next: Mutex<DateTime<Utc>>,
    step: TimeDelta,
}

impl SteppingClock {
    /// Starts at `start` and advances one second per reading.
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            next: Mutex::new(start),
            step: TimeDelta::seconds(1),
        }
    }

    /// Always reads `at`.
    pub fn frozen_at(at: DateTime<Utc>) -> Self {
        Self {
            next: Mutex::new(at),
            step: TimeDelta::zero(),
        }
    }
}

impl Default for SteppingClock {
    fn default() -> Self {
        Self::starting_at(
            Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0)
                .single()
                .expect("valid start time"),
        )
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().expect("clock lock");
        let now = *next;
        *next = now + self.step;
        now
    }
}

/// Details of a client task due on 2025-03-20 with a target of 2025-03-18.
pub fn task_details(client: &str) -> TaskDetails {
    let inward = Utc
        .with_ymd_and_hms(2025, 3, 1, 10, 0, 0)
        .single()
        .expect("valid inward date");
    let due = NaiveDate::from_ymd_opt(2025, 3, 20).expect("valid due date");
    let target = NaiveDate::from_ymd_opt(2025, 3, 18).expect("valid target date");
    TaskDetails::new(client, inward, due, target)
}

pub type TestPortal = Portal<InMemorySnapshotRepository, SteppingClock>;

/// A portal with one administrator, two employees and a team holding both
/// employees.
pub struct Practice {
    pub portal: TestPortal,
    pub repository: Arc<InMemorySnapshotRepository>,
    pub admin: UserId,
    pub alice: UserId,
    pub bob: UserId,
    pub team: TeamId,
}

pub async fn practice() -> Practice {
    let repository = Arc::new(InMemorySnapshotRepository::new());
    let store = Arc::new(
        EntityStore::open(Arc::clone(&repository))
            .await
            .expect("open store"),
    );
    let portal = Portal::new(store, Arc::new(SteppingClock::default()));
    let directory = &portal.directory;

    let admin = directory
        .register_user(RegisterUserRequest::new("Dana Admin", "dana@firm.test", Role::Admin))
        .await
        .expect("register admin")
        .id();
    let alice = directory
        .register_user(
            RegisterUserRequest::new("Alice", "alice@firm.test", Role::Employee)
                .with_team("Audit"),
        )
        .await
        .expect("register alice")
        .id();
    let bob = directory
        .register_user(
            RegisterUserRequest::new("Bob", "bob@firm.test", Role::Employee).with_team("Audit"),
        )
        .await
        .expect("register bob")
        .id();
    let team = directory
        .create_team("Audit Superstars")
        .await
        .expect("create team")
        .id();
    directory.add_member(team, alice).await.expect("add alice");
    directory.add_member(team, bob).await.expect("add bob");

    Practice {
        portal,
        repository,
        admin,
        alice,
        bob,
        team,
    }
}
