//! Session lifecycle management.
//!
//! A session is the container of everything logged on one calendar day.
//! Per date it moves through `NoSession -> Open -> Completed`; a stale open
//! session is completed by expiry instead of user action and lands in the
//! same terminal state. This module owns every mutation of sessions and
//! sets so that the cached `total_volume` is recomputed in the same call
//! that changes the underlying rows.
//!
//! ## Lifecycle Rules
//!
//! - At most one session exists per calendar date
//! - Starting a session twice on the same day returns the existing one
//! - A session left open for 24 hours or more is closed by the next
//!   expiry check, which runs before every session start and on startup
//! - Deleting a session removes all of its sets
//!
//! ## Volume
//!
//! `total_volume` is the weighted sum of the session's set values. The
//! weight comes from the set's ibadah type; unknown type ids fall back to
//! weight 1 so that a deleted or reserved type never breaks recomputation.

use crate::db::ibadah_types::IbadahTypes;
use crate::db::sessions::{Session, Sessions};
use crate::db::sets::Sets;
use crate::libs::set::{SessionSet, SetUpdate};
use anyhow::Result;
use chrono::{Duration, Local};
use std::collections::HashMap;

/// Hours an open session may idle before the expiry check closes it.
pub const SESSION_EXPIRATION_HOURS: i64 = 24;

/// State container for session and set mutations.
///
/// Owns the repositories it needs so that commands construct one service
/// and go through it instead of reaching for repositories directly.
pub struct SessionService {
    pub sessions: Sessions,
    pub sets: Sets,
    pub types: IbadahTypes,
}

impl SessionService {
    pub fn new() -> Result<SessionService> {
        Ok(SessionService {
            sessions: Sessions::new()?,
            sets: Sets::new()?,
            types: IbadahTypes::new()?,
        })
    }

    /// Starts or resumes today's session.
    ///
    /// Runs the expiry sweep first, then returns today's open session when
    /// one exists, making repeated starts on the same day idempotent.
    pub fn start_session(&mut self) -> Result<Session> {
        self.check_and_expire()?;

        let today = Local::now().date_naive();
        match self.sessions.fetch_by_date(today)? {
            // An open session is simply resumed; a completed one stays
            // completed, `continue` is the explicit way to reopen it.
            Some(existing) => Ok(existing),
            None => self.sessions.insert_start(today),
        }
    }

    /// Returns today's session, creating one when none exists.
    ///
    /// Convenience wrapper for callers that log a set without caring
    /// whether the day has started yet.
    pub fn get_or_create_today(&mut self) -> Result<Session> {
        let today = Local::now().date_naive();
        if let Some(existing) = self.sessions.fetch_by_date(today)? {
            return Ok(existing);
        }
        self.start_session()
    }

    pub fn get_today(&mut self) -> Result<Option<Session>> {
        self.sessions.fetch_by_date(Local::now().date_naive())
    }

    /// Reopens a completed session, clearing its completion timestamp.
    pub fn continue_session(&mut self, session_id: i64) -> Result<Option<Session>> {
        if self.sessions.fetch_by_id(session_id)?.is_none() {
            return Ok(None);
        }
        self.sessions.clear_completed(session_id)?;
        self.sessions.fetch_by_id(session_id)
    }

    /// Completes a session: stamps `completed_at`, freezes the recomputed
    /// volume and attaches optional notes.
    pub fn end_session(&mut self, session_id: i64, notes: Option<&str>) -> Result<Option<Session>> {
        if self.sessions.fetch_by_id(session_id)?.is_none() {
            return Ok(None);
        }

        let now = Local::now().naive_local();
        self.sessions.set_completed(session_id, now)?;
        self.recompute_volume(session_id)?;
        if let Some(notes) = notes {
            self.sessions.update_notes(session_id, notes)?;
        }
        self.sessions.fetch_by_id(session_id)
    }

    /// Deletes a session and every set it owns. Irreversible.
    pub fn delete_session(&mut self, session_id: i64) -> Result<bool> {
        if self.sessions.fetch_by_id(session_id)?.is_none() {
            return Ok(false);
        }
        self.sets.delete_by_session(session_id)?;
        self.sessions.delete(session_id)?;
        Ok(true)
    }

    /// Closes every open session whose start lies 24 hours or more in the
    /// past. Returns whether anything was expired.
    ///
    /// Expiry completes the session with a final volume recompute; nothing
    /// is deleted.
    pub fn check_and_expire(&mut self) -> Result<bool> {
        let now = Local::now().naive_local();
        let mut expired = false;

        for session in self.sessions.fetch_open()? {
            let open_for = now - session.started_at;
            if open_for >= Duration::hours(SESSION_EXPIRATION_HOURS) {
                self.sessions.set_completed(session.id, now)?;
                self.recompute_volume(session.id)?;
                expired = true;
            }
        }

        Ok(expired)
    }

    /// Appends a set to a session and refreshes the session's volume.
    ///
    /// Returns `None` without inserting anything when the session id does
    /// not resolve; callers that want implicit creation go through
    /// `get_or_create_today` first.
    pub fn add_set(
        &mut self,
        session_id: i64,
        ibadah_type_id: &str,
        value: f64,
        duration_seconds: Option<i64>,
        notes: Option<&str>,
    ) -> Result<Option<SessionSet>> {
        if self.sessions.fetch_by_id(session_id)?.is_none() {
            return Ok(None);
        }

        let set = self.sets.insert(session_id, ibadah_type_id, value, duration_seconds, notes)?;
        self.recompute_volume(session_id)?;
        Ok(Some(set))
    }

    /// Applies a partial update to a set and refreshes the owning
    /// session's volume. No-op on an unknown id.
    pub fn update_set(&mut self, set_id: i64, updates: &SetUpdate) -> Result<bool> {
        let Some(existing) = self.sets.fetch_by_id(set_id)? else {
            return Ok(false);
        };

        self.sets.update(set_id, updates)?;
        self.recompute_volume(existing.session_id)?;
        Ok(true)
    }

    /// Removes a set and refreshes the owning session's volume. No-op on
    /// an unknown id.
    pub fn delete_set(&mut self, set_id: i64) -> Result<bool> {
        let Some(existing) = self.sets.fetch_by_id(set_id)? else {
            return Ok(false);
        };

        self.sets.delete(set_id)?;
        self.recompute_volume(existing.session_id)?;
        Ok(true)
    }

    /// Recomputes and persists a session's weighted volume.
    pub fn recompute_volume(&mut self, session_id: i64) -> Result<f64> {
        let weights: HashMap<String, f64> = self
            .types
            .fetch_all()?
            .into_iter()
            .map(|t| (t.id, t.weight))
            .collect();

        let volume: f64 = self
            .sets
            .fetch_by_session(session_id)?
            .iter()
            .map(|s| s.value * weights.get(&s.ibadah_type_id).copied().unwrap_or(1.0))
            .sum();

        self.sessions.update_volume(session_id, volume)?;
        Ok(volume)
    }
}
