//! Named storage slots.
//!
//! A slot is a single key holding one JSON document, the same shape as a
//! browser `localStorage` entry. The history store persists its whole record
//! list into one slot, so any [`SlotStorage`] can back it: SQLite on disk, or
//! a plain map in tests.
//!
//! Writers in separate processes are not coordinated: the last write wins.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, ErrorCode};

use crate::database::connection::Database;
use crate::types::errors::HistoryError;

/// Read/write access to named slots.
pub trait SlotStorage {
    /// Returns the slot content, or `None` if the slot was never written.
    fn load_slot(&self, key: &str) -> Result<Option<String>, HistoryError>;
    /// Replaces the slot content.
    fn save_slot(&mut self, key: &str, value: &str) -> Result<(), HistoryError>;
}

/// Slots stored in the `slots` table of the application database.
pub struct SqliteSlotStorage {
    db: Arc<Database>,
}

impl SqliteSlotStorage {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn map_write_error(e: rusqlite::Error) -> HistoryError {
        match e.sqlite_error_code() {
            Some(ErrorCode::DiskFull) => HistoryError::QuotaExceeded(e.to_string()),
            _ => HistoryError::Persistence(e.to_string()),
        }
    }
}

impl SlotStorage for SqliteSlotStorage {
    fn load_slot(&self, key: &str) -> Result<Option<String>, HistoryError> {
        let result = self.db.connection().query_row(
            "SELECT value FROM slots WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(HistoryError::Persistence(e.to_string())),
        }
    }

    fn save_slot(&mut self, key: &str, value: &str) -> Result<(), HistoryError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64;

        self.db
            .connection()
            .execute(
                "INSERT INTO slots (key, value, updated_at) VALUES (?1, ?2, ?3) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, now],
            )
            .map_err(Self::map_write_error)?;
        Ok(())
    }
}

/// In-memory slots, optionally with a byte quota per write.
#[derive(Debug, Default, Clone)]
pub struct MemorySlotStorage {
    slots: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes larger than `bytes` fail with [`HistoryError::QuotaExceeded`].
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            slots: HashMap::new(),
            quota: Some(bytes),
        }
    }

    /// Seeds a slot with raw content, bypassing the quota.
    pub fn with_slot(mut self, key: &str, value: &str) -> Self {
        self.slots.insert(key.to_string(), value.to_string());
        self
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl SlotStorage for MemorySlotStorage {
    fn load_slot(&self, key: &str) -> Result<Option<String>, HistoryError> {
        Ok(self.slots.get(key).cloned())
    }

    fn save_slot(&mut self, key: &str, value: &str) -> Result<(), HistoryError> {
        if let Some(limit) = self.quota {
            if value.len() > limit {
                return Err(HistoryError::QuotaExceeded(format!(
                    "slot '{}' needs {} bytes, quota is {}",
                    key,
                    value.len(),
                    limit
                )));
            }
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
