//! Database schema migration management and versioning system.
//!
//! Provides a migration framework for evolving the database schema over time
//! while keeping existing data intact.
//!
//! ## Features
//!
//! - **Version Tracking**: Maintains precise records of applied migrations
//! - **Automatic Application**: Runs pending migrations during database initialization
//! - **Transaction Safety**: All migrations run within database transactions
//! - **History Tracking**: Complete audit trail of schema changes
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ajr::db::migrations::{init_with_migrations, get_db_version};
//! use rusqlite::Connection;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut conn = Connection::open("ajr.db")?;
//! init_with_migrations(&mut conn)?;
//! let version = get_db_version(&conn)?;
//! # Ok(())
//! # }
//! ```

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error, msg_info, msg_success};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

/// SQL schema for the migrations tracking table.
///
/// Each applied migration is recorded with its version, name, and
/// application timestamp.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// Represents a single database migration with execution logic.
#[derive(Debug, Clone)]
struct Migration {
    /// Unique version number for ordering and tracking
    version: u32,
    /// Human-readable name describing the migration's purpose
    name: &'static str,
    /// Function that applies the schema changes within a transaction
    up: fn(&Transaction) -> Result<()>,
}

/// Central migration system manager that orchestrates schema evolution.
///
/// Holds the registry of available migrations in version order and applies
/// the pending ones atomically. Designed for single-threaded use during
/// application startup.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    /// Creates a new migration manager with all registered migrations.
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    /// Registers all database migrations in chronological order.
    fn register_migrations(&mut self) {
        // Version 1: Base tables and performance indices
        self.add_migration(1, "create_tables_and_indices", |tx| {
            // Activity type registry. Ids are slugs for built-in types and
            // generated strings for user-created ones.
            tx.execute(
                "CREATE TABLE IF NOT EXISTS ibadah_types (
        id TEXT NOT NULL PRIMARY KEY,
        name TEXT NOT NULL,
        unit TEXT NOT NULL,
        weight REAL NOT NULL DEFAULT 1,
        is_default INTEGER NOT NULL DEFAULT 0,
        is_archived INTEGER NOT NULL DEFAULT 0,
        sort_order INTEGER NOT NULL DEFAULT 0,
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    )",
                [],
            )?;

            // One session per calendar date; open while completed_at IS NULL
            tx.execute(
                "CREATE TABLE IF NOT EXISTS sessions (
        id INTEGER NOT NULL PRIMARY KEY,
        session_date DATE NOT NULL UNIQUE,
        started_at TIMESTAMP NOT NULL,
        completed_at TIMESTAMP,
        total_volume REAL NOT NULL DEFAULT 0,
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    )",
                [],
            )?;

            // Logged sets, owned by a session
            tx.execute(
                "CREATE TABLE IF NOT EXISTS sets (
        id INTEGER NOT NULL PRIMARY KEY,
        session_id INTEGER NOT NULL,
        ibadah_type_id TEXT NOT NULL,
        value REAL NOT NULL,
        duration_seconds INTEGER,
        notes TEXT,
        set_order INTEGER NOT NULL,
        logged_at TIMESTAMP NOT NULL,
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    )",
                [],
            )?;

            // Index sessions by date for daily and range lookups
            tx.execute("CREATE INDEX IF NOT EXISTS idx_sessions_date ON sessions(session_date)", [])?;
            // Index sets by owning session for volume recomputation
            tx.execute("CREATE INDEX IF NOT EXISTS idx_sets_session_id ON sets(session_id)", [])?;
            // Index sets by type for per-ibadah analytics
            tx.execute("CREATE INDEX IF NOT EXISTS idx_sets_ibadah_type_id ON sets(ibadah_type_id)", [])?;

            Ok(())
        });

        // Version 2: Session notes for end-of-day reflections
        self.add_migration(2, "add_session_notes", |tx| {
            tx.execute("ALTER TABLE sessions ADD COLUMN notes TEXT", [])?;
            Ok(())
        });

        // Version 3: Heal registry rows that predate per-type weights
        self.add_migration(3, "backfill_type_weights", |tx| {
            tx.execute("UPDATE ibadah_types SET weight = 1 WHERE weight IS NULL OR weight <= 0", [])?;
            Ok(())
        });
    }

    /// Registers a single migration in the migration system.
    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Executes all pending migrations in the correct order.
    ///
    /// Creates the tracking table when needed, determines the current
    /// version, and applies every newer migration inside one transaction.
    /// A failed migration rolls everything back and propagates the error.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!("Database is up to date");
            return Ok(());
        }

        msg_info!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;

        for migration in pending {
            msg_info!(Message::RunningMigration(migration.version, migration.name.to_string()));

            match (migration.up)(&tx) {
                Ok(()) => {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )?;
                    msg_success!(Message::MigrationCompleted(migration.version));
                }
                Err(e) => {
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    return Err(e);
                }
            }
        }

        tx.commit()?;
        msg_success!(Message::AllMigrationsCompleted);

        Ok(())
    }

    /// Retrieves the current database schema version, 0 when no migration
    /// has been applied yet.
    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0)).unwrap_or(Some(0));

        Ok(version.unwrap_or(0))
    }

    /// Checks if a specific migration version has been applied.
    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> Result<bool> {
        let count: i32 = conn.query_row("SELECT COUNT(*) FROM migrations WHERE version = ?1", params![version], |row| row.get(0))?;

        Ok(count > 0)
    }

    /// Retrieves the complete migration history with timestamps.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;

        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Initializes a database connection by applying any pending migrations.
pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().run_migrations(conn)
}

/// Returns the current schema version of the given database.
pub fn get_db_version(conn: &Connection) -> Result<u32> {
    let exists: i32 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'migrations'",
        [],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Ok(0);
    }

    let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))?;
    Ok(version.unwrap_or(0))
}
