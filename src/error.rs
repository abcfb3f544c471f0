//! Error types for trk
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, unknown status, invalid config)
//! - 3: Blocked by schedule conflict (overlapping time intervals)
//! - 4: Operation failed (I/O, corrupt tracker file, lock contention)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the trk CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const CONFLICT: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for trk operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Schedule conflicts (exit code 3)
    #[error("Schedule conflict: interval overlaps item {other}")]
    ScheduleConflict { other: u32 },

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),

    #[error("Persistence error: {0}")]
    Corrupt(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::InvalidConfig(_) | Error::InvalidArgument(_) => exit_codes::USER_ERROR,

            // Schedule conflicts
            Error::ScheduleConflict { .. } => exit_codes::CONFLICT,

            // Operation failures
            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::LockFailed(_)
            | Error::Corrupt(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured details for JSON error envelopes
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::ScheduleConflict { other } => {
                Some(serde_json::json!({ "conflicts_with": other }))
            }
            _ => None,
        }
    }
}

/// Result type alias for trk operations
pub type Result<T> = std::result::Result<T, Error>;
