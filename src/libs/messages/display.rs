//! Display implementation for ajr application messages.
//!
//! Converts structured `Message` values into the human-readable text shown
//! in the terminal. All user-facing wording lives here, in one place, so the
//! rest of the code never formats strings inline.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === SESSION MESSAGES ===
            Message::SessionStarted(date) => format!("Session started for {}", date),
            Message::SessionResumed(date) => format!("Session for {} is already open, resuming it", date),
            Message::SessionEnded(date) => format!("Session ended for {}", date),
            Message::SessionContinued(date) => format!("Session for {} reopened", date),
            Message::SessionDeleted(id) => format!("Session {} and all its sets were deleted", id),
            Message::SessionNotFound(id) => format!("Session {} not found", id),
            Message::SessionNotFoundForDate(date) => format!("No session found for {}", date),
            Message::SessionsExpired => "Closed stale session(s) left open for more than 24 hours".to_string(),
            Message::NoSessionsInRange(from, to) => format!("No sessions between {} and {}", from, to),
            Message::ConfirmDeleteSession(date) => format!("Delete the session for {} and all of its sets?", date),
            Message::SessionsHeader(from, to) => format!("Sessions from {} to {}", from, to),

            // === SET MESSAGES ===
            Message::SetLogged(name, amount) => format!("Logged {} {}", amount, name),
            Message::SetUpdated(id) => format!("Set {} updated", id),
            Message::SetDeleted(id) => format!("Set {} deleted", id),
            Message::SetNotFound(id) => format!("Set {} not found", id),
            Message::NoSetsForDate(date) => format!("No sets logged on {}", date),
            Message::SetsHeader(date) => format!("Sets for {}", date),
            Message::InvalidSetValue(value) => format!("Value {} is not a valid amount", value),

            // === IBADAH TYPE MESSAGES ===
            Message::IbadahCreated(name) => format!("Ibadah '{}' created", name),
            Message::IbadahUpdated(name) => format!("Ibadah '{}' updated", name),
            Message::IbadahArchived(name) => format!("Ibadah '{}' archived; its history is kept", name),
            Message::IbadahRestored(name) => format!("Ibadah '{}' restored", name),
            Message::IbadahDeleted(name) => format!("Ibadah '{}' deleted", name),
            Message::IbadahNotFound(id) => format!("Ibadah '{}' not found", id),
            Message::IbadahDefaultDeleteRefused(name) => {
                format!("'{}' is a built-in ibadah and cannot be deleted, archive it instead", name)
            }
            Message::IbadahHeader => "Tracked ibadah".to_string(),
            Message::ConfirmDeleteIbadah(name) => format!("Permanently delete '{}'?", name),
            Message::DefaultsSeeded(count) => format!("Added {} default ibadah type(s)", count),

            // === STATS MESSAGES ===
            Message::DailyStatsHeader(date) => format!("📊 Stats for {}", date),
            Message::WeeklyStatsHeader(from, to) => format!("📅 Week {} to {}", from, to),
            Message::StreakDays(days) => format!("🔥 Current streak: {} day(s)", days),
            Message::RecordsHeader => "🏆 Personal records".to_string(),
            Message::BreakdownHeader => "Volume by ibadah (all time)".to_string(),
            Message::MvdHeader(date) => format!("Minimum viable day for {}", date),
            Message::NoDataToShow => "Nothing logged yet".to_string(),

            // === INSIGHT MESSAGES ===
            Message::SuggestionsHeader => "💡 Progressive overload suggestions".to_string(),
            Message::NoSuggestions => "No suggestions right now. Keep logging consistently to unlock them.".to_string(),
            Message::BurnoutHeader => "Burnout check".to_string(),
            Message::BurnoutNotDetected => "No burnout signals this week".to_string(),

            // === ADHKAR MESSAGES ===
            Message::AdhkarHeader(set, date) => format!("📿 {} adhkar for {}", set, date),
            Message::AdhkarSetCompleted(set) => format!("{} adhkar completed, may it be accepted", set),
            Message::AdhkarAlreadyCompleted(set) => format!("{} adhkar already marked complete today", set),
            Message::AdhkarReset(set) => format!("{} adhkar progress reset", set),
            Message::AdhkarItemNotFound(id) => format!("Adhkar item '{}' not found", id),
            Message::AdhkarLinkedToSession(date) => format!("Completion logged to the session for {}", date),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigParseError => "Failed to parse configuration file".to_string(),
            Message::ConfigSaveError => "Failed to save configuration file".to_string(),
            Message::PromptMvdValue(name) => format!("Minimum daily value for '{}'", name),

            // === EXPORT MESSAGES ===
            Message::ExportCompleted(path) => format!("Data exported to {}", path),
            Message::ImportCompleted(types, sessions, sets) => {
                format!("Imported {} ibadah type(s), {} session(s), {} set(s)", types, sessions, sets)
            }
            Message::ImportInvalidFormat => "The selected file is not a valid ajr backup".to_string(),
            Message::ImportUnsupportedVersion(version) => format!("Backup version {} is not supported", version),
            Message::ConfirmImportReplace => "Importing replaces all existing data. Continue?".to_string(),
            Message::ImportCancelled => "Import cancelled".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration {}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration {} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration {} failed: {}", version, error),
            Message::AllMigrationsCompleted => "Database is up to date".to_string(),

            // === GENERIC ERROR MESSAGES ===
            Message::DatabaseError(error) => format!("Database error: {}", error),
            Message::Custom(text) => text.clone(),
        };

        write!(f, "{}", text)
    }
}
