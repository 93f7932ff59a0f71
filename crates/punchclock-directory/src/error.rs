//! Error types for directory reconciliation.

use punchclock_core::EmployeeId;
use punchclock_session::SessionError;
use thiserror::Error;

/// Result type alias for directory operations.
pub type Result<T> = std::result::Result<T, ReconcileError>;

/// Errors surfaced by the directory reconciler.
///
/// Validation failures (`DuplicateId`, `NotFound`, `InternalIdTaken`) are
/// not retryable without changing the input; session failures keep their
/// own classification and pass through unchanged.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The employee id is already present in the device user table.
    #[error("Employee id already exists: {employee_id}")]
    DuplicateId { employee_id: EmployeeId },

    /// No user with this employee id exists on the device.
    #[error("No user with employee id {employee_id}")]
    NotFound { employee_id: EmployeeId },

    /// A caller-supplied internal id collides with an existing row.
    #[error("Internal id {internal_id} is already taken")]
    InternalIdTaken { internal_id: u16 },

    /// Every internal id is in use; the device table is full.
    #[error("Device user table is full")]
    InternalIdExhausted,

    /// A field failed core validation before touching the device.
    #[error("Invalid record: {0}")]
    Invalid(#[from] punchclock_core::Error),

    /// A session-level failure, classification preserved.
    #[error(transparent)]
    Session(#[from] SessionError),
}
