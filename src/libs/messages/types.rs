#[derive(Debug, Clone)]
pub enum Message {
    // === DURATION MESSAGES ===
    DurationFormatHelp(String), // raw input
    DurationExceedsMax(String), // raw input
    DurationEmpty,

    // === ENTRY MESSAGES ===
    EntryCreated {
        project: String,
        date: String,
        hours: String,
    },
    EntryUpdated {
        project: String,
        date: String,
        hours: String,
    },
    EntryCleared {
        project: String,
        date: String,
    },
    EntryUnchanged,
    EntryDeleted(i64),
    EntryNotFound(i64),
    EntriesHeader(String),    // week label
    NoEntriesForWeek(String), // week label
    ConfirmDeleteEntry(i64),

    // === WEEK MESSAGES ===
    WeekHeader(String), // week label
    WeekLocked {
        week: String,
        status: String,
    },

    // === ROW MESSAGES ===
    RowAdded(String),     // row label
    RowRemoved(String),   // row label
    RowsCleared(String),  // week label
    NoManualRows(String), // week label

    // === TIMER MESSAGES ===
    TimerStarted(String), // row label
    TimerPaused(String),  // elapsed
    TimerResumed(String), // row label
    TimerStopped {
        row: String,
        hours: String,
    },
    TimerNotRunning,
    TimerAlreadyRunning(String), // row label
    TimerAlreadyPaused,
    TimerNotPaused,
    TimerTooShort,
    TimerCapped {
        row: String,
        dropped: String,
    },
    TimerCellFull(String), // row label
    TimerStatus {
        row: String,
        elapsed: String,
        running: bool,
    },

    // === TIMESHEET MESSAGES ===
    TimesheetSubmitted(String), // week label
    TimesheetApproved(String),  // week label
    TimesheetRejected(String),  // week label
    TimesheetReopened(String),  // week label
    TimesheetStatus {
        week: String,
        status: String,
        comment: Option<String>,
    },
    TimesheetInvalidTransition {
        from: String,
        action: String,
    },
    TimesheetEmptyWeek(String), // week label

    // === SYNC MESSAGES ===
    SyncStarted(usize), // entry count
    SyncCompleted(usize),
    SyncEntryFailed(i64, String), // entry id, error
    SyncRemoteIdNotSaved {
        id: i64,
        remote_id: String,
        error: String,
    },
    SyncRemoteAlreadyGone(String), // remote id
    ServerConfigNotFound,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleUser,
    ConfigModuleServer,

    // === DATE MESSAGES ===
    InvalidDate(String),

    // === PROMPTS ===
    PromptSelectModules,
    PromptUserId,
    PromptWeekStart,
    PromptServerApiUrl,
    PromptServerAuthToken,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,

    // === GENERAL MESSAGES ===
    OperationCancelled,
}
