//! SQLite connection handling for Sitewright.
//!
//! [`Database`] owns the connection and brings the schema up to date
//! whenever a database is opened.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;

use super::migrations;
use crate::platform;

/// File name of the database inside the data directory.
pub const DATABASE_FILE: &str = "sitewright.db";

/// Environment variable that relocates the database directory.
pub const DATA_DIR_ENV: &str = "SITEWRIGHT_DATA_DIR";

/// Owned SQLite connection with an up-to-date schema.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens or creates the database file at `path` and migrates it.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        Self::migrated(Connection::open(path)?)
    }

    /// Opens a throwaway in-memory database; everything is lost on drop.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::migrated(Connection::open_in_memory()?)
    }

    /// Resolves where the database file lives.
    ///
    /// `SITEWRIGHT_DATA_DIR` wins over the platform data directory.
    pub fn default_path() -> PathBuf {
        let dir = std::env::var(DATA_DIR_ENV)
            .ok()
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(platform::get_data_dir);
        dir.join(DATABASE_FILE)
    }

    /// Opens the database at [`Database::default_path`], creating its directory first.
    pub fn open_default() -> Result<Self, rusqlite::Error> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!(dir = %parent.display(), error = %e, "could not create data directory");
            }
        }
        tracing::debug!(path = %path.display(), "opening database");
        Self::open(path)
    }

    fn migrated(conn: Connection) -> Result<Self, rusqlite::Error> {
        migrations::run_all(&conn)?;
        Ok(Self { conn })
    }

    /// Borrow the connection for queries.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
