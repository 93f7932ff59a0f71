//! Error types for enrollment coordination.

use punchclock_core::EmployeeId;
use punchclock_session::SessionError;
use thiserror::Error;

/// Result type alias for enrollment operations.
pub type Result<T> = std::result::Result<T, EnrollError>;

/// Errors surfaced by the enrollment coordinator.
#[derive(Debug, Error)]
pub enum EnrollError {
    /// The employee id does not resolve to a row in the device user table.
    ///
    /// Checked before the enrollment command is issued: an unknown id
    /// never reaches the device.
    #[error("No user with employee id {employee_id}")]
    UserNotFound { employee_id: EmployeeId },

    /// A session-level failure, classification preserved.
    #[error(transparent)]
    Session(#[from] SessionError),
}
