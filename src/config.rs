//! Caller-side connection setup.
//!
//! [`ParcelStore`](crate::ParcelStore) only ever borrows a connection. This
//! module is the glue applications and tests use to obtain one.

use std::time::Duration;

use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Deserialize;

use crate::schema::initialize_schema;

/// Environment variable overriding [`TrackerConfig::db_path`].
pub const DB_PATH_ENV: &str = "PARCEL_TRACKER_DB";

pub const DEFAULT_DB_PATH: &str = "tracker.db";

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Connection settings for the parcel database.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackerConfig {
    /// Path to the SQLite file; `:memory:` opens a private in-memory database.
    #[serde(default = "default_db_path")]
    pub db_path: String,
    /// How long a statement waits on a locked database before failing.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// Create the `parcel` table on open if it is missing.
    #[serde(default = "default_init_schema")]
    pub init_schema: bool,
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

fn default_init_schema() -> bool {
    true
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH)
    }
}

impl TrackerConfig {
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            init_schema: true,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(":memory:")
    }

    /// Defaults, with the database path taken from `PARCEL_TRACKER_DB` when set.
    pub fn from_env() -> Self {
        match std::env::var(DB_PATH_ENV) {
            Ok(path) if !path.is_empty() => Self::new(path),
            _ => Self::default(),
        }
    }

    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_init_schema(mut self, init_schema: bool) -> Self {
        self.init_schema = init_schema;
        self
    }

    /// Open a connection owned by the caller.
    pub fn open(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path)
            .with_context(|| format!("failed to open parcel database at {}", self.db_path))?;
        conn.busy_timeout(Duration::from_millis(self.busy_timeout_ms))
            .context("failed to set busy timeout")?;
        if self.init_schema {
            initialize_schema(&conn).context("failed to initialize parcel schema")?;
        }
        tracing::info!(path = %self.db_path, "parcel database opened");
        Ok(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();
        assert_eq!(config.db_path, "tracker.db");
        assert_eq!(config.busy_timeout_ms, 5_000);
        assert!(config.init_schema);
    }

    #[test]
    fn test_from_env_overrides_path() {
        std::env::set_var(DB_PATH_ENV, "/tmp/parcels-from-env.db");
        let config = TrackerConfig::from_env();
        std::env::remove_var(DB_PATH_ENV);
        assert_eq!(config.db_path, "/tmp/parcels-from-env.db");
        assert_eq!(config.busy_timeout_ms, 5_000);
    }

    #[test]
    fn test_open_in_memory_initializes_schema() -> Result<()> {
        let conn = TrackerConfig::in_memory().open()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM parcel", [], |row| row.get(0))?;
        assert_eq!(count, 0);
        Ok(())
    }

    #[test]
    fn test_open_without_schema() -> Result<()> {
        let conn = TrackerConfig::in_memory().with_init_schema(false).open()?;
        assert!(conn.query_row("SELECT COUNT(*) FROM parcel", [], |row| row.get::<_, i64>(0)).is_err());
        Ok(())
    }

    #[test]
    fn test_open_reports_bad_path() {
        let err = TrackerConfig::new("/nonexistent-dir/tracker.db").open().unwrap_err();
        assert!(err.to_string().contains("/nonexistent-dir/tracker.db"));
    }
}
