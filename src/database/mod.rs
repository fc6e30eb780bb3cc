//! Sitewright database layer.
//!
//! Provides SQLite connection management, schema migrations and the
//! named-slot storage the history store persists into.
//!
//! # Usage
//!
//! ```no_run
//! use sitewright::database::{Database, SlotStorage, SqliteSlotStorage};
//! use std::sync::Arc;
//!
//! let db = Arc::new(Database::open("sitewright.db").expect("failed to open database"));
//! let mut slots = SqliteSlotStorage::new(db);
//! slots.save_slot("greeting", "\"hello\"").expect("write failed");
//! ```

pub mod connection;
pub mod migrations;
pub mod slots;

pub use connection::Database;
pub use slots::{MemorySlotStorage, SlotStorage, SqliteSlotStorage};
