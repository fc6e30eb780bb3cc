//! Unit tests for the database layer: migrations and slot storage.

use std::sync::Arc;

use sitewright::database::migrations::{get_schema_version, run_all, CURRENT_SCHEMA_VERSION};
use sitewright::database::{Database, MemorySlotStorage, SlotStorage, SqliteSlotStorage};
use sitewright::types::errors::HistoryError;
use tempfile::TempDir;

#[test]
fn test_open_in_memory_runs_migrations() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_migrations_are_idempotent() {
    let db = Database::open_in_memory().unwrap();
    run_all(db.connection()).unwrap();
    run_all(db.connection()).unwrap();

    let count: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, CURRENT_SCHEMA_VERSION as i64);
}

#[test]
fn test_slots_table_exists() {
    let db = Database::open_in_memory().unwrap();
    let exists: bool = db
        .connection()
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = 'table' AND name = 'slots'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert!(exists);
}

#[test]
fn test_slot_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sitewright.db");

    {
        let db = Arc::new(Database::open(&path).unwrap());
        let mut slots = SqliteSlotStorage::new(db);
        slots.save_slot("sitewright-history", "[]").unwrap();
    }

    let db = Arc::new(Database::open(&path).unwrap());
    let slots = SqliteSlotStorage::new(db);
    assert_eq!(slots.load_slot("sitewright-history").unwrap().as_deref(), Some("[]"));
}

#[test]
fn test_slots_are_independent() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let mut slots = SqliteSlotStorage::new(db);
    slots.save_slot("a", "1").unwrap();
    slots.save_slot("b", "2").unwrap();

    assert_eq!(slots.load_slot("a").unwrap().as_deref(), Some("1"));
    assert_eq!(slots.load_slot("b").unwrap().as_deref(), Some("2"));
    assert_eq!(slots.load_slot("c").unwrap(), None);
}

#[test]
fn test_memory_seeded_slot_bypasses_quota() {
    let mut slots = MemorySlotStorage::with_quota(4).with_slot("k", "seeded value");
    assert_eq!(slots.load_slot("k").unwrap().as_deref(), Some("seeded value"));

    let result = slots.save_slot("k", "12345");
    assert!(matches!(result, Err(HistoryError::QuotaExceeded(_))));
    assert_eq!(slots.raw("k"), Some("seeded value"));
}
