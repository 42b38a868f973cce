//! # muster-store
//!
//! Local mission persistence.
//!
//! Missions are stored one row each in an embedded SQLite database, so
//! concurrent writers and crashes can no longer clobber the whole mission
//! list the way the old single-preference-key JSON array could.  The
//! [`legacy`] module still reads and writes that old array layout for
//! import/export.
//!
//! The crate exposes a synchronous [`Database`] handle wrapping a
//! `rusqlite::Connection` with typed CRUD helpers.

pub mod database;
pub mod legacy;
pub mod migrations;
pub mod missions;
pub mod settings;

mod error;

pub use database::Database;
pub use error::{Result, StoreError};
pub use legacy::ImportStats;
