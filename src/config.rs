use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};

use crate::engine::AdvancePolicy;
use crate::models::Version;
use crate::store::{InMemoryVersionStore, SqliteVersionStore, VersionStore};

const APP_NAME: &str = "whatsnew";
const CONFIG_FILE: &str = "config.json";

/// Where presentation history is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Forgotten when the process exits.
    Memory,
    #[default]
    Sqlite,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version of the host app. `WHATSNEW_APP_VERSION` takes precedence.
    pub app_version: Option<Version>,
    pub store: StoreBackend,
    /// SQLite database location. Defaults to the platform data directory.
    pub database_path: Option<PathBuf>,
    pub advance_policy: AdvancePolicy,
}

impl Config {
    /// Load configuration from the user's config directory.
    /// Returns defaults if the file doesn't exist or fails to parse.
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        }
    }

    fn try_load() -> Result<Self> {
        let config_path = get_config_path()?;
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = serde_json::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// The running app's version.
    pub fn current_version(&self) -> Version {
        Version::current(self.app_version)
    }

    /// Open the configured version store, running migrations when needed.
    pub fn open_store(&self) -> Result<Arc<dyn VersionStore>> {
        match self.store {
            StoreBackend::Memory => Ok(Arc::new(InMemoryVersionStore::new())),
            StoreBackend::Sqlite => {
                let store = match &self.database_path {
                    Some(path) => SqliteVersionStore::open(path),
                    None => SqliteVersionStore::open_default(),
                }
                .context("Failed to open version store")?;
                store.migrate().context("Failed to migrate version store")?;
                Ok(Arc::new(store))
            }
        }
    }
}

fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
