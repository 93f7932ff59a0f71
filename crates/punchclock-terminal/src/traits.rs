//! Terminal trait definitions.
//!
//! These traits establish the contract between the punchclock core and one
//! physical attendance terminal, enabling substitution between the mock
//! terminal and a real vendor transport without touching the callers.
//!
//! All methods use native `async fn` (Edition 2024 RPITIT); the traits are
//! therefore not object-safe, and consumers take a generic connector
//! parameter instead of `Box<dyn ...>`.

#![allow(async_fn_in_trait)]

use crate::error::Result;
use crate::types::{DeviceUser, TerminalConfig};
use punchclock_core::{EmployeeId, PromptIndex, PunchEvent, TemplateSlot};

/// Factory for live terminal connections.
///
/// One connector stands for one way of reaching terminals (real transport,
/// mock); the address to dial comes from the [`TerminalConfig`] so that a
/// single connector can serve several physical terminals.
pub trait TerminalConnector: Send + Sync {
    /// The connection type this connector produces.
    type Conn: TerminalConnection;

    /// Establish a connection to the terminal at the configured address.
    ///
    /// # Errors
    ///
    /// Returns `TerminalError::Unreachable` if the terminal does not answer
    /// within the configured timeout. Any other error means the dial
    /// reached the device but the session could not be established.
    async fn connect(&self, config: &TerminalConfig) -> Result<Self::Conn>;
}

/// One live session with a terminal.
///
/// Every mutating interaction with the device must happen between
/// [`disable`](TerminalConnection::disable) and
/// [`enable`](TerminalConnection::enable): while disabled, the terminal
/// suspends badge and fingerprint handling so the user table and punch log
/// cannot shift underneath an operation. The session manager owns that
/// bracket; code outside it should never call these two directly.
pub trait TerminalConnection: Send {
    /// Suspend terminal operation (start of the bracket).
    ///
    /// # Errors
    ///
    /// Returns `TerminalError::Busy` if the device reports another
    /// operation mid-flight, or `Transport` if the session broke.
    async fn disable(&mut self) -> Result<()>;

    /// Resume terminal operation (end of the bracket).
    ///
    /// # Errors
    ///
    /// Returns `Transport` if the session broke. Callers must treat a
    /// failure here as leaving the device in an unknown state.
    async fn enable(&mut self) -> Result<()>;

    /// Fetch the full device user table.
    async fn users(&mut self) -> Result<Vec<DeviceUser>>;

    /// Write a user row, creating it or overwriting the row with the same
    /// internal id.
    async fn write_user(&mut self, user: &DeviceUser) -> Result<()>;

    /// Remove the user row with the given employee id, if present.
    async fn remove_user(&mut self, employee_id: &EmployeeId) -> Result<()>;

    /// Fetch the raw punch log.
    ///
    /// The log is returned as the device holds it: unordered, with
    /// duplicates possible. Filtering and aggregation are the caller's
    /// concern.
    async fn punches(&mut self) -> Result<Vec<PunchEvent>>;

    /// Start fingerprint enrollment for an internal id into a template slot.
    ///
    /// The call returns once the device has accepted the command; the
    /// actual capture is completed by a human at the terminal and cannot be
    /// observed through this connection.
    async fn begin_enroll(&mut self, internal_id: u16, slot: TemplateSlot) -> Result<()>;

    /// Play an audible voice prompt on the terminal speaker.
    async fn play_prompt(&mut self, index: PromptIndex) -> Result<()>;

    /// Tear down the connection.
    ///
    /// Consumes the connection so a torn-down session cannot be reused.
    async fn disconnect(self) -> Result<()>;
}
