//! Runtime configuration for the `taskdesk` binary.
//!
//! Values are layered with the `config` crate: built-in defaults, then an
//! optional `taskdesk.toml` (or an explicit file), then environment
//! variables prefixed with `TASKDESK__` such as `TASKDESK__STORE__DIRECTORY`.

use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Base name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "taskdesk";

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Where the portal document is stored.
    pub store: StoreConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

/// Location and initial contents of the persisted document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the document; created when missing.
    pub directory: String,
    /// File name of the document inside `directory`.
    pub file_name: String,
    /// Whether an empty store starts with demonstration data.
    pub seed_demo_data: bool,
}

impl StoreConfig {
    /// Returns the store directory as a path.
    #[must_use]
    pub fn directory_path(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(&self.directory)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            directory: ".taskdesk".to_owned(),
            file_name: "taskdesk.json".to_owned(),
            seed_demo_data: false,
        }
    }
}

/// Log filtering and formatting.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

impl PortalConfig {
    /// Loads configuration from every layer.
    ///
    /// When `path` is given that file must exist; otherwise
    /// `taskdesk.toml` in the working directory is used if present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a file cannot be parsed or a value has
    /// the wrong type.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        let file = path.map_or_else(
            || File::with_name(DEFAULT_CONFIG_NAME).required(false),
            |explicit| File::with_name(explicit.as_str()).required(true),
        );
        Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("TASKDESK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
