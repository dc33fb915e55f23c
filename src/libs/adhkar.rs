//! Daily adhkar (remembrance) progress tracking.
//!
//! A parallel, simpler counter system next to the session model: two fixed
//! recitation sets, morning (sabah) and evening (masaa), each an ordered
//! list of items with a required repeat count. Progress lives in its own
//! JSON record under the application data directory and resets itself on
//! the first mutation of a new day.
//!
//! Counting past an item's required repetitions is allowed; completing a
//! set is a separate explicit action that stamps a timestamp and is
//! idempotent. Completion is what links back into the session model: the
//! caller logs a value-1 set under the reserved `adhkar` type id.

use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

pub const ADHKAR_FILE_NAME: &str = "adhkar.json";

/// One of the two daily recitation sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdhkarSet {
    Sabah,
    Masaa,
}

impl AdhkarSet {
    pub fn label(&self) -> &'static str {
        match self {
            AdhkarSet::Sabah => "Morning",
            AdhkarSet::Masaa => "Evening",
        }
    }

    /// Note attached to the completion set logged into the session.
    pub fn completion_note(&self) -> &'static str {
        match self {
            AdhkarSet::Sabah => "Morning Adhkar",
            AdhkarSet::Masaa => "Evening Adhkar",
        }
    }
}

impl FromStr for AdhkarSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sabah" | "morning" => Ok(AdhkarSet::Sabah),
            "masaa" | "evening" => Ok(AdhkarSet::Masaa),
            other => Err(format!("unknown adhkar set '{}'", other)),
        }
    }
}

/// A fixed recitation item with its required repeat count.
pub struct AdhkarItem {
    pub id: &'static str,
    pub name: &'static str,
    pub count: u32,
}

pub const ADHKAR_SABAH: &[AdhkarItem] = &[
    AdhkarItem { id: "ayat-kursi", name: "Ayat al-Kursi", count: 1 },
    AdhkarItem { id: "ikhlas", name: "Surah al-Ikhlas", count: 3 },
    AdhkarItem { id: "falaq", name: "Surah al-Falaq", count: 3 },
    AdhkarItem { id: "nas", name: "Surah an-Nas", count: 3 },
    AdhkarItem { id: "sayyid-istighfar", name: "Sayyid al-Istighfar", count: 1 },
    AdhkarItem { id: "asbahna", name: "Asbahna wa asbahal-mulku lillah", count: 1 },
    AdhkarItem { id: "subhanallah-bihamdihi", name: "SubhanAllahi wa bihamdihi", count: 100 },
    AdhkarItem { id: "la-ilaha-illallah", name: "La ilaha illallahu wahdahu la sharika lah", count: 10 },
];

pub const ADHKAR_MASAA: &[AdhkarItem] = &[
    AdhkarItem { id: "ayat-kursi", name: "Ayat al-Kursi", count: 1 },
    AdhkarItem { id: "ikhlas", name: "Surah al-Ikhlas", count: 3 },
    AdhkarItem { id: "falaq", name: "Surah al-Falaq", count: 3 },
    AdhkarItem { id: "nas", name: "Surah an-Nas", count: 3 },
    AdhkarItem { id: "amsayna", name: "Amsayna wa amsal-mulku lillah", count: 1 },
    AdhkarItem { id: "subhanallah-bihamdihi", name: "SubhanAllahi wa bihamdihi", count: 100 },
    AdhkarItem { id: "la-ilaha-illallah", name: "La ilaha illallahu wahdahu la sharika lah", count: 10 },
    AdhkarItem { id: "audhu-kalimat", name: "A'udhu bikalimatillahit-tammat", count: 3 },
];

/// The items of one set, in recitation order.
pub fn adhkar_items(set: AdhkarSet) -> &'static [AdhkarItem] {
    match set {
        AdhkarSet::Sabah => ADHKAR_SABAH,
        AdhkarSet::Masaa => ADHKAR_MASAA,
    }
}

/// Persisted state of one calendar day's adhkar progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyAdhkarState {
    pub date: NaiveDate,
    pub sabah_progress: BTreeMap<String, u32>,
    pub masaa_progress: BTreeMap<String, u32>,
    pub sabah_completed_at: Option<NaiveDateTime>,
    pub masaa_completed_at: Option<NaiveDateTime>,
}

impl DailyAdhkarState {
    fn empty(date: NaiveDate) -> Self {
        DailyAdhkarState {
            date,
            sabah_progress: BTreeMap::new(),
            masaa_progress: BTreeMap::new(),
            sabah_completed_at: None,
            masaa_completed_at: None,
        }
    }
}

/// Store for the daily adhkar record.
///
/// The whole record is rewritten on every mutation; every mutating
/// operation first resets the state when the stored date is not today.
pub struct AdhkarStore {
    path: PathBuf,
    pub state: DailyAdhkarState,
}

impl AdhkarStore {
    /// Loads today's record, starting fresh when the file is missing,
    /// unreadable or belongs to an earlier day.
    pub fn read() -> Result<AdhkarStore> {
        let path = DataStorage::new().get_path(ADHKAR_FILE_NAME)?;
        let today = Local::now().date_naive();

        let state = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str::<DailyAdhkarState>(&contents).unwrap_or_else(|_| DailyAdhkarState::empty(today)),
            Err(_) => DailyAdhkarState::empty(today),
        };

        let mut store = AdhkarStore { path, state };
        store.check_and_reset_if_new_day()?;
        Ok(store)
    }

    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.state)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Wipes the state when the stored date is not today. Runs before
    /// every mutation.
    pub fn check_and_reset_if_new_day(&mut self) -> Result<()> {
        let today = Local::now().date_naive();
        if self.state.date != today {
            self.state = DailyAdhkarState::empty(today);
            self.save()?;
        }
        Ok(())
    }

    pub fn progress(&self, set: AdhkarSet, item_id: &str) -> u32 {
        self.progress_map(set).get(item_id).copied().unwrap_or(0)
    }

    /// Items at or past their required count, out of the set's total.
    pub fn total_progress(&self, set: AdhkarSet) -> (usize, usize) {
        let items = adhkar_items(set);
        let completed = items.iter().filter(|item| self.progress(set, item.id) >= item.count).count();
        (completed, items.len())
    }

    pub fn is_completed(&self, set: AdhkarSet) -> bool {
        self.completed_at(set).is_some()
    }

    pub fn completed_at(&self, set: AdhkarSet) -> Option<NaiveDateTime> {
        match set {
            AdhkarSet::Sabah => self.state.sabah_completed_at,
            AdhkarSet::Masaa => self.state.masaa_completed_at,
        }
    }

    /// Adds one repetition to an item. Counts accumulate freely past the
    /// requirement; reaching it never completes the set by itself.
    pub fn increment(&mut self, set: AdhkarSet, item_id: &str) -> Result<u32> {
        self.check_and_reset_if_new_day()?;
        let map = self.progress_map_mut(set);
        let count = map.entry(item_id.to_string()).or_insert(0);
        *count += 1;
        let new_count = *count;
        self.save()?;
        Ok(new_count)
    }

    pub fn set_count(&mut self, set: AdhkarSet, item_id: &str, count: u32) -> Result<()> {
        self.check_and_reset_if_new_day()?;
        self.progress_map_mut(set).insert(item_id.to_string(), count);
        self.save()?;
        Ok(())
    }

    /// Marks a set complete. Idempotent: returns false when it already
    /// carried a completion timestamp today.
    pub fn mark_complete(&mut self, set: AdhkarSet) -> Result<bool> {
        self.check_and_reset_if_new_day()?;
        if self.is_completed(set) {
            return Ok(false);
        }

        let now = Local::now().naive_local();
        match set {
            AdhkarSet::Sabah => self.state.sabah_completed_at = Some(now),
            AdhkarSet::Masaa => self.state.masaa_completed_at = Some(now),
        }
        self.save()?;
        Ok(true)
    }

    /// Clears one set's counts and completion timestamp.
    pub fn reset_progress(&mut self, set: AdhkarSet) -> Result<()> {
        self.check_and_reset_if_new_day()?;
        match set {
            AdhkarSet::Sabah => {
                self.state.sabah_progress.clear();
                self.state.sabah_completed_at = None;
            }
            AdhkarSet::Masaa => {
                self.state.masaa_progress.clear();
                self.state.masaa_completed_at = None;
            }
        }
        self.save()?;
        Ok(())
    }

    fn progress_map(&self, set: AdhkarSet) -> &BTreeMap<String, u32> {
        match set {
            AdhkarSet::Sabah => &self.state.sabah_progress,
            AdhkarSet::Masaa => &self.state.masaa_progress,
        }
    }

    fn progress_map_mut(&mut self, set: AdhkarSet) -> &mut BTreeMap<String, u32> {
        match set {
            AdhkarSet::Sabah => &mut self.state.sabah_progress,
            AdhkarSet::Masaa => &mut self.state.masaa_progress,
        }
    }
}
