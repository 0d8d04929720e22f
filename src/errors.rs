//! Error types for the infoline CLI
//!
//! Each error type has a corresponding error code for programmatic handling.

use thiserror::Error;

/// Result type alias for infoline operations
pub type Result<T> = std::result::Result<T, InfolineError>;

/// Main error type for all infoline operations
#[derive(Debug, Error)]
pub enum InfolineError {
    /// Workspace not found - no .infoline directory in any ancestor
    #[error("Workspace not found: {0}")]
    WorkspaceNotFound(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Schema validation failed
    #[error("Schema validation failed: {0}")]
    SchemaValidation(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// School id not present in the roster
    #[error("Unknown school: {0}")]
    UnknownSchool(String),

    /// Category id not present in the catalog
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Column id not defined for the category
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// No stored entry for the given coordinates
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    /// Status transition refused by the lifecycle table or its checks
    #[error("Transition denied: {0}")]
    TransitionDenied(String),

    /// Actor's role or scope does not cover the requested action
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Submitted value fails the column's validation
    #[error("Invalid value: {0}")]
    ValueInvalid(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl InfolineError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            InfolineError::WorkspaceNotFound(_) => "WORKSPACE_NOT_FOUND",
            InfolineError::InvalidJson(_) => "INVALID_JSON",
            InfolineError::SchemaValidation(_) => "SCHEMA_VALIDATION",
            InfolineError::FileNotFound(_) => "FILE_NOT_FOUND",
            InfolineError::ConfigError(_) => "CONFIG_ERROR",
            InfolineError::UnknownSchool(_) => "UNKNOWN_SCHOOL",
            InfolineError::UnknownCategory(_) => "UNKNOWN_CATEGORY",
            InfolineError::UnknownColumn(_) => "UNKNOWN_COLUMN",
            InfolineError::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            InfolineError::TransitionDenied(_) => "TRANSITION_DENIED",
            InfolineError::PermissionDenied(_) => "PERMISSION_DENIED",
            InfolineError::ValueInvalid(_) => "VALUE_INVALID",
            InfolineError::Io(_) => "IO_ERROR",
        }
    }
}

/// Convert an error to an appropriate exit code.
///
/// Lifecycle refusals exit 2 so scripts can tell "blocked by a rule" apart
/// from "something broke"; everything else exits 1.
pub fn to_exit_code(error: &InfolineError) -> i32 {
    match error {
        InfolineError::TransitionDenied(_)
        | InfolineError::PermissionDenied(_)
        | InfolineError::ValueInvalid(_) => 2,
        _ => 1,
    }
}
