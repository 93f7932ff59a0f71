//! Capability-typed boundary to a biometric attendance terminal.
//!
//! This crate defines the contract between the punchclock core and one
//! physical attendance terminal: a [`TerminalConnector`] that dials a device
//! at a configured address, and a [`TerminalConnection`] exposing the
//! operations the device supports (suspend/resume, user table access, punch
//! log retrieval, enrollment start, voice prompts).
//!
//! How bytes are framed on the wire is deliberately out of scope; a vendor
//! transport implements these traits against the real protocol, while
//! [`MockTerminal`] implements them in memory for development and testing.
//!
//! All trait methods are native `async fn` (Edition 2024 RPITIT), so no
//! `async_trait` macro is involved. Like the rest of the workspace, dynamic
//! dispatch is not used here: consumers are generic over the connector type.
//!
//! # Examples
//!
//! ```
//! use punchclock_core::EmployeeId;
//! use punchclock_terminal::{
//!     MockTerminal, TerminalConfig, TerminalConnection, TerminalConnector,
//! };
//!
//! # async fn example() -> punchclock_terminal::Result<()> {
//! let terminal = MockTerminal::new();
//! let config = TerminalConfig::new("192.168.1.201");
//!
//! let mut conn = terminal.connect(&config).await?;
//! conn.disable().await?;
//! let users = conn.users().await?;
//! conn.enable().await?;
//! conn.disconnect().await?;
//! assert!(users.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod mock;
pub mod traits;
pub mod types;

pub use error::{Result, TerminalError};
pub use mock::{MockFault, MockTerminal};
pub use traits::{TerminalConnection, TerminalConnector};
pub use types::{DeviceUser, TerminalConfig};
