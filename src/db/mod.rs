//! Database layer for the ajr application.
//!
//! Provides the data persistence layer built on SQLite, with one repository
//! module per collection and a migration system for schema evolution.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ajr::db::{db::Db, sessions::Sessions, sets::Sets};
//! use chrono::Local;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut sessions = Sessions::new()?;
//! let session = sessions.insert_start(Local::now().date_naive())?;
//! let mut sets = Sets::new()?;
//! sets.insert(session.id, "quran", 5.0, None, None)?;
//! # Ok(())
//! # }
//! ```

/// Core database connection and initialization module.
///
/// Provides the `Db` struct that opens the SQLite connection and applies
/// pending migrations.
pub mod db;

/// Database schema migration system.
///
/// Handles versioned schema changes and tracks migration history.
pub mod migrations;

/// Ibadah type registry operations.
///
/// Stores the trackable activity definitions, seeds the built-in defaults
/// and manages the archive/restore/delete lifecycle.
pub mod ibadah_types;

/// Daily session tracking.
///
/// Records one session per calendar date with its open/completed state and
/// cached total volume.
pub mod sessions;

/// Logged set storage.
///
/// CRUD operations for individual logged activity occurrences owned by
/// their sessions.
pub mod sets;
