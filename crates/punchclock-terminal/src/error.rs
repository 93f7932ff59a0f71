//! Error types for terminal transport operations.

/// Result type alias for terminal operations.
pub type Result<T> = std::result::Result<T, TerminalError>;

/// Errors that can occur while talking to an attendance terminal.
///
/// `Unreachable` is reserved for connection establishment; everything after
/// a successful connect surfaces as `Timeout`, `Busy`, or `Transport`.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    /// The terminal could not be reached within the configured timeout.
    #[error("Terminal unreachable at {host}:{port} after {timeout_ms}ms")]
    Unreachable {
        host: String,
        port: u16,
        timeout_ms: u64,
    },

    /// A mid-session operation timed out.
    #[error("Operation timeout after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// The device refused an operation because another is mid-flight.
    #[error("Device busy: {operation}")]
    Busy { operation: String },

    /// The session broke mid-operation (connection reset, protocol error).
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The device returned a record this toolkit cannot interpret.
    #[error("Invalid record from device: {message}")]
    InvalidRecord { message: String },

    /// Invalid terminal configuration.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TerminalError {
    /// Create a new unreachable error.
    pub fn unreachable(host: impl Into<String>, port: u16, timeout_ms: u64) -> Self {
        Self::Unreachable {
            host: host.into(),
            port,
            timeout_ms,
        }
    }

    /// Create a new timeout error.
    pub fn timeout(duration_ms: u64) -> Self {
        Self::Timeout { duration_ms }
    }

    /// Create a new busy error.
    pub fn busy(operation: impl Into<String>) -> Self {
        Self::Busy {
            operation: operation.into(),
        }
    }

    /// Create a new transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a new invalid record error.
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns `true` for failures of connection establishment, the only
    /// class of error the session manager is allowed to retry.
    #[must_use]
    pub fn is_connect_failure(&self) -> bool {
        matches!(self, Self::Unreachable { .. })
    }
}
