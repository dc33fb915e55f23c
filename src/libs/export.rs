//! Data export and backup restore.
//!
//! Two output shapes serve different needs:
//!
//! - **JSON** is the full backup envelope: every collection plus the user
//!   settings, wrapped with a format version so older backups can be
//!   rejected or migrated on import.
//! - **CSV** is a flat log of sets for spreadsheets and quick analysis;
//!   it is export-only.
//!
//! Import replaces the whole store. The caller confirms with the user
//! before invoking it; this module only validates and writes.

use crate::db::ibadah_types::IbadahTypes;
use crate::db::sessions::{Session, Sessions};
use crate::db::sets::Sets;
use crate::libs::config::Config;
use crate::libs::ibadah::{IbadahType, IbadahUnit};
use crate::libs::messages::Message;
use crate::libs::set::SessionSet;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::path::PathBuf;

/// Version written into every backup envelope.
pub const EXPORT_VERSION: &str = "1.0.0";

/// Supported export output formats.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ExportFormat {
    /// Flat set log for spreadsheet tools.
    Csv,
    /// Complete backup envelope, restorable with import.
    Json,
}

/// The complete persisted state in one serializable envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct BackupData {
    pub version: String,
    pub exported_at: NaiveDateTime,
    pub ibadah_types: Vec<IbadahType>,
    pub sessions: Vec<Session>,
    pub sets: Vec<SessionSet>,
    pub settings: Config,
}

/// One row of the CSV set log.
#[derive(Debug, Serialize)]
struct CsvSetRow {
    date: String,
    ibadah: String,
    value: f64,
    unit: String,
    duration_seconds: Option<i64>,
    notes: String,
    logged_at: String,
}

/// Export handler holding the chosen format and destination.
pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Creates an exporter, deriving a timestamped file name in the
    /// current directory when no explicit output path is given.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let output_path = output_path.unwrap_or_else(|| {
            let extension = match format {
                ExportFormat::Csv => "csv",
                ExportFormat::Json => "json",
            };
            PathBuf::from(format!("ajr-backup-{}.{}", Local::now().format("%Y-%m-%d-%H%M%S"), extension))
        });

        Exporter { format, output_path }
    }

    /// Gathers the full store and writes it in the configured format.
    /// Returns the path written to.
    pub fn export(&self) -> Result<PathBuf> {
        let data = gather_backup_data()?;

        match self.format {
            ExportFormat::Json => self.write_json(&data)?,
            ExportFormat::Csv => self.write_csv(&data)?,
        }

        Ok(self.output_path.clone())
    }

    fn write_json(&self, data: &BackupData) -> Result<()> {
        let file = File::create(&self.output_path)?;
        serde_json::to_writer_pretty(&file, data)?;
        Ok(())
    }

    fn write_csv(&self, data: &BackupData) -> Result<()> {
        let dates: HashMap<i64, String> = data.sessions.iter().map(|s| (s.id, s.session_date.to_string())).collect();
        let types: HashMap<&str, &IbadahType> = data.ibadah_types.iter().map(|t| (t.id.as_str(), t)).collect();

        let mut writer = csv::Writer::from_path(&self.output_path)?;
        for set in &data.sets {
            let ibadah = types.get(set.ibadah_type_id.as_str());
            writer.serialize(CsvSetRow {
                date: dates.get(&set.session_id).cloned().unwrap_or_default(),
                ibadah: ibadah.map(|t| t.name.clone()).unwrap_or_else(|| set.ibadah_type_id.clone()),
                value: set.value,
                unit: ibadah.map(|t| t.unit).unwrap_or(IbadahUnit::Count).to_string(),
                duration_seconds: set.duration_seconds,
                notes: set.notes.clone().unwrap_or_default(),
                logged_at: set.logged_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            })?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Reads a backup file and validates its structure and version without
/// touching the store.
pub fn read_backup(path: &PathBuf) -> Result<BackupData> {
    let contents = std::fs::read_to_string(path)?;
    let data: BackupData =
        serde_json::from_str(&contents).map_err(|_| msg_error_anyhow!(Message::ImportInvalidFormat))?;

    if !data.version.starts_with("1.") {
        return Err(msg_error_anyhow!(Message::ImportUnsupportedVersion(data.version)));
    }

    Ok(data)
}

/// Replaces the entire store with the backup's contents.
///
/// Returns `(types, sessions, sets)` counts. The settings from the backup
/// overwrite the config file as well.
pub fn restore_backup(data: &BackupData) -> Result<(usize, usize, usize)> {
    let mut types = IbadahTypes::new()?;
    let mut sessions = Sessions::new()?;
    let mut sets = Sets::new()?;

    sets.delete_all()?;
    sessions.delete_all()?;
    types.delete_all()?;

    for ibadah in &data.ibadah_types {
        types.insert(ibadah)?;
    }
    for session in &data.sessions {
        sessions.insert_full(session)?;
    }
    for set in &data.sets {
        sets.insert_full(set)?;
    }

    data.settings.save()?;

    Ok((data.ibadah_types.len(), data.sessions.len(), data.sets.len()))
}

fn gather_backup_data() -> Result<BackupData> {
    let mut types = IbadahTypes::new()?;
    let mut sessions = Sessions::new()?;
    let mut sets = Sets::new()?;

    Ok(BackupData {
        version: EXPORT_VERSION.to_string(),
        exported_at: Local::now().naive_local(),
        ibadah_types: types.fetch_all()?,
        sessions: sessions.fetch_all()?,
        sets: sets.fetch_all()?,
        settings: Config::read()?,
    })
}
