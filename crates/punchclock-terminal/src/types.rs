//! Configuration and raw data types for the terminal boundary.

use crate::error::{Result, TerminalError};
use punchclock_core::EmployeeId;
use punchclock_core::constants::{DEFAULT_PORT, DEFAULT_TIMEOUT_MS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Connection configuration for one physical terminal.
///
/// Supplied once by the environment or caller and validated at startup;
/// there is no interactive prompting anywhere in this workspace. Port and
/// timeout fall back to the device defaults when omitted from serialized
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalConfig {
    /// Terminal hostname or IPv4 address.
    pub host: String,

    /// Terminal TCP port (default 4370).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Transport timeout in milliseconds (default 5000).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl TerminalConfig {
    /// Create a configuration with default port and timeout.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Validate the configuration once, before any connection attempt.
    ///
    /// # Errors
    /// Returns `TerminalError::Configuration` if the host is empty or
    /// contains whitespace, or if port or timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() || self.host.chars().any(char::is_whitespace) {
            return Err(TerminalError::configuration(format!(
                "invalid host: {:?}",
                self.host
            )));
        }
        if self.port == 0 {
            return Err(TerminalError::configuration("port must not be 0"));
        }
        if self.timeout_ms == 0 {
            return Err(TerminalError::configuration("timeout must not be 0"));
        }
        Ok(())
    }

    /// Transport timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// The `host:port` address string, used to key the session gate.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for TerminalConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// A raw row of the device user table.
///
/// This is the record exactly as the terminal stores it: privilege is the
/// numeric device code, not the mapped enum. The directory reconciler owns
/// the mapping to [`punchclock_core::UserRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceUser {
    /// Device-assigned numeric index into the user table.
    pub internal_id: u16,

    /// Caller-assigned stable identifier, unique within the table.
    pub employee_id: EmployeeId,

    /// User name (may be empty on the device).
    pub name: String,

    /// Raw privilege code as stored by the device.
    pub privilege_code: u8,

    /// Device password field.
    pub password: String,

    /// Device group identifier.
    pub group_id: String,
}
