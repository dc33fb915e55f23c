//! Database operations for the ibadah type registry.
//!
//! The registry is the list of trackable activities. Built-in defaults are
//! seeded on first run; re-running the seeding heals rows that predate the
//! weight column and appends defaults introduced by newer releases without
//! touching user-created types. Archiving is a reversible soft state;
//! deletion is irreversible and refused for built-in types.

use crate::db::db::Db;
use crate::libs::ibadah::{IbadahType, IbadahUnit, IbadahUpdate, DEFAULT_IBADAH_TYPES};
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension};
use std::str::FromStr;

const SCHEMA_IBADAH_TYPES: &str = "CREATE TABLE IF NOT EXISTS ibadah_types (
    id TEXT NOT NULL PRIMARY KEY,
    name TEXT NOT NULL,
    unit TEXT NOT NULL,
    weight REAL NOT NULL DEFAULT 1,
    is_default INTEGER NOT NULL DEFAULT 0,
    is_archived INTEGER NOT NULL DEFAULT 0,
    sort_order INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMP NOT NULL,
    updated_at TIMESTAMP NOT NULL
);";
const INSERT_TYPE: &str = "INSERT INTO ibadah_types (id, name, unit, weight, is_default, is_archived, sort_order, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
const SELECT_TYPE: &str =
    "SELECT id, name, unit, weight, is_default, is_archived, sort_order, created_at, updated_at FROM ibadah_types";
const UPDATE_ARCHIVED: &str = "UPDATE ibadah_types SET is_archived = ?2, updated_at = ?3 WHERE id = ?1";
const DELETE_TYPE: &str = "DELETE FROM ibadah_types WHERE id = ?1";

pub struct IbadahTypes {
    pub conn: Connection,
}

impl IbadahTypes {
    pub fn new() -> Result<IbadahTypes> {
        let db = Db::new().map_err(|e| msg_error_anyhow!(Message::DatabaseError(e.to_string())))?;
        db.conn.execute(SCHEMA_IBADAH_TYPES, [])?;

        Ok(IbadahTypes { conn: db.conn })
    }

    /// Seeds the built-in types and heals existing rows.
    ///
    /// Missing defaults are inserted; rows with a non-positive weight get
    /// the default weight back. Returns how many defaults were added.
    pub fn ensure_defaults(&mut self) -> Result<usize> {
        let now = Local::now().naive_local();
        let mut added = 0;

        for default in DEFAULT_IBADAH_TYPES {
            match self.fetch_by_id(default.id)? {
                None => {
                    self.conn.execute(
                        INSERT_TYPE,
                        params![default.id, default.name, default.unit.to_string(), default.weight, true, false, default.sort_order, now, now],
                    )?;
                    added += 1;
                }
                Some(existing) => {
                    if existing.weight <= 0.0 {
                        self.conn.execute(
                            "UPDATE ibadah_types SET weight = ?2, updated_at = ?3 WHERE id = ?1",
                            params![default.id, default.weight, now],
                        )?;
                    }
                }
            }
        }

        Ok(added)
    }

    pub fn insert(&mut self, ibadah: &IbadahType) -> Result<()> {
        self.conn.execute(
            INSERT_TYPE,
            params![
                ibadah.id,
                ibadah.name,
                ibadah.unit.to_string(),
                ibadah.weight,
                ibadah.is_default,
                ibadah.is_archived,
                ibadah.sort_order,
                ibadah.created_at,
                ibadah.updated_at
            ],
        )?;
        Ok(())
    }

    pub fn fetch_by_id(&mut self, id: &str) -> Result<Option<IbadahType>> {
        let ibadah = self
            .conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_TYPE), params![id], Self::map_row)
            .optional()?;
        Ok(ibadah)
    }

    /// Every registered type in display order, archived ones included.
    pub fn fetch_all(&mut self) -> Result<Vec<IbadahType>> {
        self.fetch_where("ORDER BY sort_order ASC, id ASC")
    }

    /// Types currently offered for logging and suggestions.
    pub fn fetch_active(&mut self) -> Result<Vec<IbadahType>> {
        self.fetch_where("WHERE is_archived = 0 ORDER BY sort_order ASC, id ASC")
    }

    /// Applies a partial update, returns whether the id resolved.
    pub fn update(&mut self, id: &str, updates: &IbadahUpdate) -> Result<bool> {
        let Some(existing) = self.fetch_by_id(id)? else {
            return Ok(false);
        };

        let name = updates.name.clone().unwrap_or(existing.name);
        let unit = updates.unit.unwrap_or(existing.unit);
        let weight = updates.weight.unwrap_or(existing.weight);
        let sort_order = updates.sort_order.unwrap_or(existing.sort_order);
        let now = Local::now().naive_local();

        self.conn.execute(
            "UPDATE ibadah_types SET name = ?2, unit = ?3, weight = ?4, sort_order = ?5, updated_at = ?6 WHERE id = ?1",
            params![id, name, unit.to_string(), weight, sort_order, now],
        )?;
        Ok(true)
    }

    pub fn set_archived(&mut self, id: &str, archived: bool) -> Result<bool> {
        let now = Local::now().naive_local();
        let touched = self.conn.execute(UPDATE_ARCHIVED, params![id, archived, now])?;
        Ok(touched > 0)
    }

    /// Irreversible removal. Callers refuse this for default types.
    pub fn delete(&mut self, id: &str) -> Result<usize> {
        let deleted = self.conn.execute(DELETE_TYPE, params![id])?;
        Ok(deleted)
    }

    pub fn delete_all(&mut self) -> Result<()> {
        self.conn.execute("DELETE FROM ibadah_types", [])?;
        Ok(())
    }

    fn fetch_where(&mut self, clause: &str) -> Result<Vec<IbadahType>> {
        let mut stmt = self.conn.prepare(&format!("{} {}", SELECT_TYPE, clause))?;
        let type_iter = stmt.query_map([], Self::map_row)?;
        let mut types = Vec::new();
        for ibadah in type_iter {
            types.push(ibadah?);
        }
        Ok(types)
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<IbadahType> {
        let unit_str: String = row.get(2)?;
        Ok(IbadahType {
            id: row.get(0)?,
            name: row.get(1)?,
            unit: IbadahUnit::from_str(&unit_str).unwrap_or(IbadahUnit::Count),
            weight: row.get(3)?,
            is_default: row.get(4)?,
            is_archived: row.get(5)?,
            sort_order: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }
}
