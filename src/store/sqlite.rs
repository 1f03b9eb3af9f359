use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};

use super::{schema, StoreError, VersionStore};
use crate::models::Version;

/// A [`VersionStore`] backed by SQLite.
///
/// Clones share the same connection.
#[derive(Clone)]
pub struct SqliteVersionStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteVersionStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open the store in the platform data directory.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(Self::default_path()?)
    }

    pub fn default_path() -> Result<PathBuf, StoreError> {
        let dirs = directories::ProjectDirs::from("", "", "whatsnew").ok_or(StoreError::NoDataDir)?;
        Ok(dirs.data_dir().join("whatsnew.db"))
    }

    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<(), StoreError> {
        let conn = self.lock()?;
        schema::run_migrations(&conn)
    }

    /// When `version` was first recorded, if ever.
    pub fn presented_at(&self, version: &Version) -> Result<Option<DateTime<Utc>>, StoreError> {
        let conn = self.lock()?;
        let raw: Option<String> = conn
            .query_row(
                "SELECT presented_at FROM presented_versions WHERE version = ?",
                [version.to_string()],
                |row| row.get(0),
            )
            .optional()?;

        Ok(raw.map(parse_datetime))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl VersionStore for SqliteVersionStore {
    fn presented_versions(&self) -> Result<Vec<Version>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT version FROM presented_versions ORDER BY major, minor, patch",
        )?;

        let raw = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        raw.into_iter()
            .map(|s| s.parse().map_err(|_| StoreError::Corrupt(s)))
            .collect()
    }

    fn save(&self, version: &Version) -> Result<(), StoreError> {
        let conn = self.lock()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO presented_versions (version, major, minor, patch, presented_at)
             VALUES (?, ?, ?, ?, ?)",
            (
                version.to_string(),
                version.major,
                version.minor,
                version.patch,
                Utc::now().to_rfc3339(),
            ),
        )?;

        if inserted == 0 {
            tracing::debug!("Version {} was already recorded as presented", version);
        }
        Ok(())
    }

    fn remove_all(&self) -> Result<(), StoreError> {
        let conn = self.lock()?;
        let removed = conn.execute("DELETE FROM presented_versions", [])?;
        tracing::info!("Removed {} presented version(s)", removed);
        Ok(())
    }

    fn has_presented(&self, version: &Version) -> Result<bool, StoreError> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM presented_versions WHERE version = ?",
            [version.to_string()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

fn parse_datetime(s: String) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
