//! Command-line entry point for the task portal.
//!
//! Usage:
//!
//! ```text
//! taskdesk [--config <path>] <command>
//! ```
//!
//! Run `taskdesk --help` for the full command list. The portal document is
//! stored under the configured store directory and created on first use.

use clap::Parser;
use mockable::DefaultClock;
use std::io;
use std::sync::Arc;
use taskdesk::cli::{Cli, run};
use taskdesk::portal::Portal;
use taskdesk::settings::PortalConfig;
use taskdesk::store::{
    adapters::JsonFileSnapshotRepository, domain::PortalSnapshot, services::EntityStore,
};
use taskdesk::telemetry::init_telemetry;
use tracing::error;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    let config = PortalConfig::load(cli.config.as_deref())?;
    init_telemetry(&config.logging)?;

    let clock = Arc::new(DefaultClock);
    let initial = if config.store.seed_demo_data {
        PortalSnapshot::demo(&*clock)?
    } else {
        PortalSnapshot::empty()
    };
    let repository = Arc::new(JsonFileSnapshotRepository::open(
        config.store.directory_path(),
        config.store.file_name.as_str(),
    )?);
    let store = Arc::new(EntityStore::open_with_default(repository, move || initial).await?);
    let portal = Portal::new(store, clock);

    let mut stdout = io::stdout().lock();
    if let Err(err) = run(cli.command, &portal, &mut stdout).await {
        error!(error = %err, "command failed");
        return Err(err.into());
    }
    Ok(())
}
