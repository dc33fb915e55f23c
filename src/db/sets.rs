//! Database operations for logged ibadah sets.
//!
//! A set is one logged occurrence of an activity inside a session. The
//! repository only stores and retrieves rows; keeping the owning session's
//! cached volume in sync is the session service's job, performed in the
//! same call that mutates a set.

use crate::db::db::Db;
use crate::libs::messages::Message;
use crate::libs::set::{SessionSet, SetUpdate};
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension};

const SCHEMA_SETS: &str = "CREATE TABLE IF NOT EXISTS sets (
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
);";
const INSERT_SET: &str = "INSERT INTO sets (session_id, ibadah_type_id, value, duration_seconds, notes, set_order, logged_at, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7, ?7)";
const SELECT_SET: &str =
    "SELECT id, session_id, ibadah_type_id, value, duration_seconds, notes, set_order, logged_at, created_at, updated_at FROM sets";
const COUNT_BY_SESSION: &str = "SELECT COUNT(*) FROM sets WHERE session_id = ?1";
const DELETE_SET: &str = "DELETE FROM sets WHERE id = ?1";
const DELETE_BY_SESSION: &str = "DELETE FROM sets WHERE session_id = ?1";

pub struct Sets {
    pub conn: Connection,
}

impl Sets {
    pub fn new() -> Result<Sets> {
        let db = Db::new().map_err(|e| msg_error_anyhow!(Message::DatabaseError(e.to_string())))?;
        db.conn.execute(SCHEMA_SETS, [])?;

        Ok(Sets { conn: db.conn })
    }

    /// Appends a set to a session.
    ///
    /// `set_order` is the number of sets already in the session at insert
    /// time. Orders are never renumbered afterwards; deletions leave gaps.
    pub fn insert(
        &mut self,
        session_id: i64,
        ibadah_type_id: &str,
        value: f64,
        duration_seconds: Option<i64>,
        notes: Option<&str>,
    ) -> Result<SessionSet> {
        let set_order = self.count_by_session(session_id)?;
        let now = Local::now().naive_local();
        self.conn.execute(
            INSERT_SET,
            params![session_id, ibadah_type_id, value, duration_seconds, notes, set_order, now],
        )?;
        let id = self.conn.last_insert_rowid();
        self.fetch_by_id(id)?
            .ok_or_else(|| anyhow::anyhow!("set {} vanished after insert", id))
    }

    pub fn fetch_by_id(&mut self, id: i64) -> Result<Option<SessionSet>> {
        let set = self
            .conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_SET), params![id], Self::map_row)
            .optional()?;
        Ok(set)
    }

    /// Sets of one session in logging order.
    pub fn fetch_by_session(&mut self, session_id: i64) -> Result<Vec<SessionSet>> {
        self.fetch_where("WHERE session_id = ?1 ORDER BY set_order ASC", params![session_id])
    }

    /// Every set in the store. Aggregation runs over this slice.
    pub fn fetch_all(&mut self) -> Result<Vec<SessionSet>> {
        self.fetch_where("ORDER BY session_id ASC, set_order ASC", params![])
    }

    pub fn count_by_session(&mut self, session_id: i64) -> Result<i64> {
        let count: i64 = self.conn.query_row(COUNT_BY_SESSION, params![session_id], |row| row.get(0))?;
        Ok(count)
    }

    /// Applies a partial update, returns whether a row was touched.
    pub fn update(&mut self, id: i64, updates: &SetUpdate) -> Result<bool> {
        let Some(existing) = self.fetch_by_id(id)? else {
            return Ok(false);
        };

        let value = updates.value.unwrap_or(existing.value);
        let duration_seconds = updates.duration_seconds.or(existing.duration_seconds);
        let notes = updates.notes.clone().or(existing.notes);
        let now = Local::now().naive_local();

        self.conn.execute(
            "UPDATE sets SET value = ?2, duration_seconds = ?3, notes = ?4, updated_at = ?5 WHERE id = ?1",
            params![id, value, duration_seconds, notes, now],
        )?;
        Ok(true)
    }

    pub fn delete(&mut self, id: i64) -> Result<usize> {
        let deleted = self.conn.execute(DELETE_SET, params![id])?;
        Ok(deleted)
    }

    /// Removes every set of a session. Part of session deletion.
    pub fn delete_by_session(&mut self, session_id: i64) -> Result<usize> {
        let deleted = self.conn.execute(DELETE_BY_SESSION, params![session_id])?;
        Ok(deleted)
    }

    pub fn delete_all(&mut self) -> Result<()> {
        self.conn.execute("DELETE FROM sets", [])?;
        Ok(())
    }

    /// Inserts a fully specified set row with its original id, used when
    /// restoring a backup.
    pub fn insert_full(&mut self, set: &SessionSet) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO sets (id, session_id, ibadah_type_id, value, duration_seconds, notes, set_order, logged_at, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                set.id,
                set.session_id,
                set.ibadah_type_id,
                set.value,
                set.duration_seconds,
                set.notes,
                set.set_order,
                set.logged_at,
                set.created_at,
                set.updated_at
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn fetch_where(&mut self, clause: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<SessionSet>> {
        let mut stmt = self.conn.prepare(&format!("{} {}", SELECT_SET, clause))?;
        let set_iter = stmt.query_map(params, Self::map_row)?;
        let mut sets = Vec::new();
        for set in set_iter {
            sets.push(set?);
        }
        Ok(sets)
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SessionSet> {
        Ok(SessionSet {
            id: row.get(0)?,
            session_id: row.get(1)?,
            ibadah_type_id: row.get(2)?,
            value: row.get(3)?,
            duration_seconds: row.get(4)?,
            notes: row.get(5)?,
            set_order: row.get(6)?,
            logged_at: row.get(7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }
}
