use crate::db::db::Db;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

const SCHEMA_SESSIONS: &str = "CREATE TABLE IF NOT EXISTS sessions (
    id INTEGER NOT NULL PRIMARY KEY,
    session_date DATE NOT NULL UNIQUE,
    started_at TIMESTAMP NOT NULL,
    completed_at TIMESTAMP,
    total_volume REAL NOT NULL DEFAULT 0,
    created_at TIMESTAMP NOT NULL,
    updated_at TIMESTAMP NOT NULL
);";
const INSERT_SESSION: &str =
    "INSERT INTO sessions (session_date, started_at, total_volume, created_at, updated_at) VALUES (?1, ?2, 0, ?3, ?3)";
const SELECT_SESSION: &str = "SELECT id, session_date, started_at, completed_at, total_volume, notes, created_at, updated_at FROM sessions";
const UPDATE_COMPLETED: &str = "UPDATE sessions SET completed_at = ?2, updated_at = ?2 WHERE id = ?1";
const UPDATE_REOPENED: &str = "UPDATE sessions SET completed_at = NULL, updated_at = ?2 WHERE id = ?1";
const UPDATE_VOLUME: &str = "UPDATE sessions SET total_volume = ?2, updated_at = ?3 WHERE id = ?1";
const UPDATE_NOTES: &str = "UPDATE sessions SET notes = ?2, updated_at = ?3 WHERE id = ?1";
const DELETE_SESSION: &str = "DELETE FROM sessions WHERE id = ?1";

/// The container of everything logged on one calendar day.
///
/// A session is open while `completed_at` is NULL. The per-date UNIQUE
/// constraint keeps one session per day; expiry keeps at most one session
/// open overall.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub session_date: NaiveDate,
    pub started_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
    pub total_volume: f64,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Session {
    pub fn is_open(&self) -> bool {
        self.completed_at.is_none()
    }
}

pub struct Sessions {
    pub conn: Connection,
}

impl Sessions {
    pub fn new() -> Result<Sessions> {
        let db = Db::new().map_err(|e| msg_error_anyhow!(Message::DatabaseError(e.to_string())))?;
        db.conn.execute(SCHEMA_SESSIONS, [])?;

        Ok(Sessions { conn: db.conn })
    }

    /// Creates an open session for the given date, started now.
    pub fn insert_start(&mut self, date: NaiveDate) -> Result<Session> {
        self.insert_start_at(date, Local::now().naive_local())
    }

    /// Creates an open session with an explicit start timestamp.
    ///
    /// Used by import and by tests that need sessions started in the past.
    pub fn insert_start_at(&mut self, date: NaiveDate, started_at: NaiveDateTime) -> Result<Session> {
        let now = Local::now().naive_local();
        self.conn.execute(INSERT_SESSION, params![date, started_at, now])?;
        let id = self.conn.last_insert_rowid();
        self.fetch_by_id(id)?
            .ok_or_else(|| anyhow::anyhow!("session {} vanished after insert", id))
    }

    pub fn fetch_by_id(&mut self, id: i64) -> Result<Option<Session>> {
        let session = self
            .conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_SESSION), params![id], Self::map_row)
            .optional()?;
        Ok(session)
    }

    pub fn fetch_by_date(&mut self, date: NaiveDate) -> Result<Option<Session>> {
        let session = self
            .conn
            .query_row(&format!("{} WHERE session_date = ?1", SELECT_SESSION), params![date], Self::map_row)
            .optional()?;
        Ok(session)
    }

    /// All sessions that are still open, oldest first.
    pub fn fetch_open(&mut self) -> Result<Vec<Session>> {
        self.fetch_where("WHERE completed_at IS NULL ORDER BY session_date ASC", params![])
    }

    /// Sessions within an inclusive date range, newest first.
    pub fn fetch_range(&mut self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Session>> {
        self.fetch_where(
            "WHERE session_date >= ?1 AND session_date <= ?2 ORDER BY session_date DESC",
            params![from, to],
        )
    }

    /// The full history, newest first.
    pub fn fetch_all(&mut self) -> Result<Vec<Session>> {
        self.fetch_where("ORDER BY session_date DESC", params![])
    }

    pub fn set_completed(&mut self, id: i64, completed_at: NaiveDateTime) -> Result<()> {
        self.conn.execute(UPDATE_COMPLETED, params![id, completed_at])?;
        Ok(())
    }

    pub fn clear_completed(&mut self, id: i64) -> Result<()> {
        let now = Local::now().naive_local();
        self.conn.execute(UPDATE_REOPENED, params![id, now])?;
        Ok(())
    }

    pub fn update_volume(&mut self, id: i64, total_volume: f64) -> Result<()> {
        let now = Local::now().naive_local();
        self.conn.execute(UPDATE_VOLUME, params![id, total_volume, now])?;
        Ok(())
    }

    pub fn update_notes(&mut self, id: i64, notes: &str) -> Result<()> {
        let now = Local::now().naive_local();
        self.conn.execute(UPDATE_NOTES, params![id, notes, now])?;
        Ok(())
    }

    pub fn delete(&mut self, id: i64) -> Result<usize> {
        let deleted = self.conn.execute(DELETE_SESSION, params![id])?;
        Ok(deleted)
    }

    pub fn delete_all(&mut self) -> Result<()> {
        self.conn.execute("DELETE FROM sessions", [])?;
        Ok(())
    }

    /// Inserts a fully specified session row with its original id, used
    /// when restoring a backup so that set ownership stays intact.
    pub fn insert_full(&mut self, session: &Session) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO sessions (id, session_date, started_at, completed_at, total_volume, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                session.id,
                session.session_date,
                session.started_at,
                session.completed_at,
                session.total_volume,
                session.notes,
                session.created_at,
                session.updated_at
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn fetch_where(&mut self, clause: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<Session>> {
        let mut stmt = self.conn.prepare(&format!("{} {}", SELECT_SESSION, clause))?;
        let session_iter = stmt.query_map(params, Self::map_row)?;
        let mut sessions = Vec::new();
        for session in session_iter {
            sessions.push(session?);
        }
        Ok(sessions)
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Session> {
        Ok(Session {
            id: row.get(0)?,
            session_date: row.get(1)?,
            started_at: row.get(2)?,
            completed_at: row.get(3)?,
            total_volume: row.get(4)?,
            notes: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }
}
