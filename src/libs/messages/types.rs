#[derive(Debug, Clone)]
pub enum Message {
    // === SESSION MESSAGES ===
    SessionStarted(String),
    SessionResumed(String),
    SessionEnded(String),
    SessionContinued(String),
    SessionDeleted(i64),
    SessionNotFound(i64),
    SessionNotFoundForDate(String),
    SessionsExpired,
    NoSessionsInRange(String, String),
    ConfirmDeleteSession(String),
    SessionsHeader(String, String),

    // === SET MESSAGES ===
    SetLogged(String, String),
    SetUpdated(i64),
    SetDeleted(i64),
    SetNotFound(i64),
    NoSetsForDate(String),
    SetsHeader(String),
    InvalidSetValue(f64),

    // === IBADAH TYPE MESSAGES ===
    IbadahCreated(String),
    IbadahUpdated(String),
    IbadahArchived(String),
    IbadahRestored(String),
    IbadahDeleted(String),
    IbadahNotFound(String),
    IbadahDefaultDeleteRefused(String),
    IbadahHeader,
    ConfirmDeleteIbadah(String),
    DefaultsSeeded(usize),

    // === STATS MESSAGES ===
    DailyStatsHeader(String),
    WeeklyStatsHeader(String, String),
    StreakDays(u32),
    RecordsHeader,
    BreakdownHeader,
    MvdHeader(String),
    NoDataToShow,

    // === INSIGHT MESSAGES ===
    SuggestionsHeader,
    NoSuggestions,
    BurnoutHeader,
    BurnoutNotDetected,

    // === ADHKAR MESSAGES ===
    AdhkarHeader(String, String),
    AdhkarSetCompleted(String),
    AdhkarAlreadyCompleted(String),
    AdhkarReset(String),
    AdhkarItemNotFound(String),
    AdhkarLinkedToSession(String),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigParseError,
    ConfigSaveError,
    PromptMvdValue(String),

    // === EXPORT MESSAGES ===
    ExportCompleted(String),
    ImportCompleted(usize, usize, usize),
    ImportInvalidFormat,
    ImportUnsupportedVersion(String),
    ConfirmImportReplace,
    ImportCancelled,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,

    // === GENERIC ERROR MESSAGES ===
    DatabaseError(String),
    Custom(String),
}
