//! Schema migrations for the Sitewright SQLite database.
//!
//! The schema is a single `slots` table: one row per named slot, each
//! holding a whole JSON document. [`MIGRATIONS`] lists the schema steps in
//! order; `schema_version` records which of them a database already has.

use rusqlite::Connection;

/// `(version, description, sql)` for every schema step, oldest first.
const MIGRATIONS: &[(i32, &str, &str)] = &[(
    1,
    "Initial schema: named storage slots",
    "CREATE TABLE IF NOT EXISTS slots (
         key TEXT PRIMARY KEY,
         value TEXT NOT NULL,
         updated_at INTEGER NOT NULL
     );",
)];

/// Highest version in [`MIGRATIONS`].
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Version the slots schema is at; 0 for a fresh file.
pub fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |row| row.get(0))
        .unwrap_or(0)
}

/// Brings the slots schema up to [`CURRENT_SCHEMA_VERSION`].
///
/// Each pending step and its `schema_version` row commit together.
pub fn run_all(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         CREATE TABLE IF NOT EXISTS schema_version (
             version INTEGER PRIMARY KEY,
             applied_at INTEGER NOT NULL,
             description TEXT NOT NULL
         );",
    )?;

    let current = get_schema_version(conn);
    for &(version, description, sql) in MIGRATIONS.iter().filter(|(v, _, _)| *v > current) {
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(sql)?;
        tx.execute(
            "INSERT OR IGNORE INTO schema_version (version, applied_at, description) VALUES (?1, ?2, ?3)",
            rusqlite::params![version, chrono::Utc::now().timestamp(), description],
        )?;
        tx.commit()?;
        tracing::debug!(version, description, "slots schema migrated");
    }

    Ok(())
}
