//! Presentation history: which release versions the user has already seen.

mod schema;
mod sqlite;

use std::collections::BTreeSet;
use std::sync::Mutex;

use thiserror::Error;

use crate::models::Version;

pub use sqlite::SqliteVersionStore;

/// Version store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Could not determine data directory")]
    NoDataDir,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt version record '{0}'")]
    Corrupt(String),

    #[error("Store lock poisoned")]
    Poisoned,
}

/// Persists which versions have been presented.
///
/// Implementations use interior mutability so a store can be shared behind an
/// `Arc` between the gate and the engine it starts.
pub trait VersionStore: Send + Sync {
    /// All presented versions, ascending.
    fn presented_versions(&self) -> Result<Vec<Version>, StoreError>;

    /// Record `version` as presented. Saving twice is not an error.
    fn save(&self, version: &Version) -> Result<(), StoreError>;

    /// Forget every presented version.
    fn remove_all(&self) -> Result<(), StoreError>;

    fn has_presented(&self, version: &Version) -> Result<bool, StoreError> {
        Ok(self.presented_versions()?.contains(version))
    }
}

/// A store that lives only as long as the process. Handy for previews and tests.
#[derive(Debug, Default)]
pub struct InMemoryVersionStore {
    versions: Mutex<BTreeSet<Version>>,
}

impl InMemoryVersionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_presented(versions: impl IntoIterator<Item = Version>) -> Self {
        Self {
            versions: Mutex::new(versions.into_iter().collect()),
        }
    }
}

impl VersionStore for InMemoryVersionStore {
    fn presented_versions(&self) -> Result<Vec<Version>, StoreError> {
        let versions = self.versions.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(versions.iter().copied().collect())
    }

    fn save(&self, version: &Version) -> Result<(), StoreError> {
        let mut versions = self.versions.lock().map_err(|_| StoreError::Poisoned)?;
        versions.insert(*version);
        Ok(())
    }

    fn remove_all(&self) -> Result<(), StoreError> {
        let mut versions = self.versions.lock().map_err(|_| StoreError::Poisoned)?;
        versions.clear();
        Ok(())
    }

    fn has_presented(&self, version: &Version) -> Result<bool, StoreError> {
        let versions = self.versions.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(versions.contains(version))
    }
}
