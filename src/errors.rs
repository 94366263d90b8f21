//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid status: {0} (use OK or NOT_OK)")]
    InvalidStatus(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    /// CT / field / table could not be parsed or is out of bounds.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ---------------------------
    // Registration / shift logic
    // ---------------------------
    #[error(
        "Structure CT {ct} / field {field} / table {table_no} is already registered. \
         Please contact your supervisor."
    )]
    Duplicate { ct: u32, field: u32, table_no: u32 },

    #[error("Incomplete shift: clock-out for {0} without a matching clock-in")]
    IncompleteShift(String),

    #[error("Already clocked in on {0}")]
    AlreadyClockedIn(String),

    #[error("Already clocked out on {0}")]
    AlreadyClockedOut(String),

    // ---------------------------
    // Roster / permissions
    // ---------------------------
    #[error("Roster error: {0}")]
    Roster(String),

    #[error("Unknown PIN")]
    UnknownPin,

    #[error("Permission denied: {0}")]
    Unauthorized(String),

    // ---------------------------
    // Records
    // ---------------------------
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Vacation request {0} has already been decided")]
    VacationAlreadyDecided(i64),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export / import errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("Import error: {0}")]
    Import(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
