//! Error types for device sessions.
//!
//! Every device-facing failure is caught at the session boundary,
//! classified into one of these kinds, and returned as a typed result;
//! nothing below this crate is allowed to terminate the process.

use punchclock_terminal::TerminalError;
use thiserror::Error;

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors surfaced by the session manager.
///
/// Kinds are stable: callers route on the variant and show the
/// human-readable detail. `Unreachable`, `Busy`, and `Timeout` are
/// retryable from the caller's point of view; `Transport` and `Device`
/// are not without operator attention.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The terminal did not answer within the transport timeout.
    #[error("Terminal unreachable at {address}")]
    Unreachable { address: String },

    /// The device (or its session gate) refused because another operation
    /// is mid-flight.
    #[error("Device busy: {operation}")]
    Busy { operation: String },

    /// A caller deadline elapsed while queued for the terminal.
    #[error("Timed out after {waited_ms}ms waiting for the terminal")]
    Timeout { waited_ms: u64 },

    /// The session broke mid-operation; the connection has been torn down.
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The device answered, but with something this toolkit cannot accept.
    #[error("Device error: {message}")]
    Device { message: String },
}

impl SessionError {
    /// Create a new transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a new device error.
    pub fn device(message: impl Into<String>) -> Self {
        Self::Device {
            message: message.into(),
        }
    }

    /// Returns `true` if retrying the whole operation may succeed without
    /// changing its input.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Unreachable { .. } | Self::Busy { .. } | Self::Timeout { .. }
        )
    }
}

/// Classification of transport failures into session error kinds.
impl From<TerminalError> for SessionError {
    fn from(err: TerminalError) -> Self {
        match err {
            TerminalError::Unreachable { host, port, .. } => SessionError::Unreachable {
                address: format!("{host}:{port}"),
            },
            TerminalError::Timeout { duration_ms } => SessionError::Timeout {
                waited_ms: duration_ms,
            },
            TerminalError::Busy { operation } => SessionError::Busy { operation },
            TerminalError::Transport { message } => SessionError::Transport { message },
            TerminalError::InvalidRecord { message } => SessionError::Device { message },
            TerminalError::Configuration { message } => SessionError::Device { message },
            TerminalError::Io(err) => SessionError::Transport {
                message: err.to_string(),
            },
        }
    }
}
