//! Configuration management for the ajr application.
//!
//! Settings live in a JSON file inside the platform application data
//! directory, next to the database. The only configurable piece of core
//! behavior is the set of minimum-viable-day targets: per-ibadah daily
//! minimums the stats view compares against what was actually logged.
//!
//! ## Storage
//!
//! - **Windows**: `%LOCALAPPDATA%\lacodda\ajr\config.json`
//! - **macOS**: `~/Library/Application Support/lacodda/ajr/config.json`
//! - **Linux**: `~/.local/share/lacodda/ajr/config.json`
//!
//! `Config::read()` returns defaults when no file exists, so the
//! application runs without any setup.
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use ajr::libs::config::Config;
//!
//! # fn main() -> anyhow::Result<()> {
//! // Load existing configuration or defaults
//! let config = Config::read()?;
//!
//! if let Some(minimum) = config.minimum_viable_day("quran") {
//!     println!("Daily Quran minimum: {}", minimum);
//! }
//! # Ok(())
//! # }
//! ```

use crate::libs::data_storage::DataStorage;
use crate::libs::ibadah::IbadahType;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// A per-ibadah daily minimum target.
///
/// The minimum viable day is the floor a user wants to hold on hard days.
/// Stats compare each configured target against the raw per-type total of
/// a date's session.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MinimumViableDay {
    pub ibadah_type_id: String,
    pub minimum_value: f64,
}

/// Main configuration container for the application.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    /// Minimum-viable-day targets, at most one per ibadah type.
    #[serde(default)]
    pub minimum_viable_days: Vec<MinimumViableDay>,
}

impl Config {
    /// Reads configuration from the filesystem, falling back to defaults
    /// when no file exists yet.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str).map_err(|_| msg_error_anyhow!(Message::ConfigParseError))?;
        Ok(config)
    }

    /// Saves the current configuration with pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(&config_file_path).map_err(|_| msg_error_anyhow!(Message::ConfigSaveError))?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// The configured minimum for a type, when one exists.
    pub fn minimum_viable_day(&self, ibadah_type_id: &str) -> Option<f64> {
        self.minimum_viable_days
            .iter()
            .find(|mvd| mvd.ibadah_type_id == ibadah_type_id)
            .map(|mvd| mvd.minimum_value)
    }

    /// Inserts or replaces the minimum for a type.
    pub fn set_minimum_viable_day(&mut self, ibadah_type_id: &str, minimum_value: f64) {
        if let Some(existing) = self.minimum_viable_days.iter_mut().find(|mvd| mvd.ibadah_type_id == ibadah_type_id) {
            existing.minimum_value = minimum_value;
            return;
        }
        self.minimum_viable_days.push(MinimumViableDay {
            ibadah_type_id: ibadah_type_id.to_string(),
            minimum_value,
        });
    }

    /// Drops the minimum for a type.
    pub fn remove_minimum_viable_day(&mut self, ibadah_type_id: &str) {
        self.minimum_viable_days.retain(|mvd| mvd.ibadah_type_id != ibadah_type_id);
    }

    /// Runs the interactive setup wizard.
    ///
    /// Presents the active ibadah types in a multi-select list and prompts
    /// for a daily minimum for each selected one. Existing targets are
    /// pre-filled as defaults; types left unselected keep their current
    /// configuration untouched.
    pub fn init(types: &[IbadahType]) -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        if types.is_empty() {
            return Ok(config);
        }

        let labels: Vec<String> = types
            .iter()
            .map(|t| match config.minimum_viable_day(&t.id) {
                Some(minimum) => format!("{} (current minimum: {})", t.name, minimum),
                None => t.name.clone(),
            })
            .collect();

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt("Select ibadah to set a minimum viable day for")
            .items(&labels)
            .interact()?;

        for &index in &selected {
            let ibadah = &types[index];
            let default_value = config.minimum_viable_day(&ibadah.id).unwrap_or(1.0);
            let minimum: f64 = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptMvdValue(ibadah.name.clone()).to_string())
                .default(default_value)
                .interact_text()?;
            config.set_minimum_viable_day(&ibadah.id, minimum);
        }

        Ok(config)
    }
}
