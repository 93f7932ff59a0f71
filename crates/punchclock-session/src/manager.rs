//! Device session manager.
//!
//! This module owns exclusive access to one attendance terminal and wraps
//! every operation in the suspend/operate/resume bracket the device
//! requires:
//!
//! ```text
//! acquire gate ─► connect ─► disable ─► operate ─► enable ─► disconnect
//!      │                                                        │
//!      └──────────────── released on every exit path ───────────┘
//! ```
//!
//! The bracket is guaranteed: once `disable` has succeeded, `enable` is
//! attempted exactly once on every path out, including operation failure,
//! and `disconnect` runs best-effort after that. A cleanup failure is
//! logged but never masks the error that caused the unwind.
//!
//! # Examples
//!
//! ```no_run
//! use punchclock_session::SessionManager;
//! use punchclock_terminal::{MockTerminal, TerminalConfig, TerminalConnection};
//!
//! # async fn example() -> Result<(), punchclock_session::SessionError> {
//! let manager = SessionManager::new(MockTerminal::new(), TerminalConfig::new("192.168.1.201"))?;
//!
//! let users = manager
//!     .with_session(async |conn| conn.users().await.map_err(punchclock_session::SessionError::from))
//!     .await?;
//! println!("{} users on the device", users.len());
//! # Ok(())
//! # }
//! ```

use crate::error::SessionError;
use crate::gate;
use punchclock_terminal::{TerminalConfig, TerminalConnection, TerminalConnector};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, warn};

/// Default deadline for queued session acquisition.
pub const DEFAULT_ACQUIRE_TIMEOUT_MS: u64 = 30_000;

/// Default number of extra connection attempts after a failed dial.
///
/// There is a single physical device with no redundancy, so retrying more
/// than a couple of times only delays the error the caller will see
/// anyway. Retries apply to connection establishment only; operations are
/// never re-issued.
pub const DEFAULT_CONNECT_RETRIES: u32 = 2;

/// Tunable session behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// How long a caller queues for the gate before failing with `Timeout`.
    pub acquire_timeout: Duration,

    /// Extra connection attempts after the first `Unreachable`.
    pub connect_retries: u32,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            acquire_timeout: Duration::from_millis(DEFAULT_ACQUIRE_TIMEOUT_MS),
            connect_retries: DEFAULT_CONNECT_RETRIES,
        }
    }
}

/// Serializes all access to one attendance terminal.
///
/// The manager holds the process-wide gate for its terminal address: two
/// managers created for the same `host:port` share the same gate, so
/// exclusivity holds no matter how the callers are wired. Callers queue on
/// the gate in arrival order and fail with [`SessionError::Timeout`] when
/// their deadline elapses before the terminal frees up, without ever
/// having touched the device.
pub struct SessionManager<C: TerminalConnector> {
    connector: C,
    config: TerminalConfig,
    options: SessionOptions,
    gate: Arc<AsyncMutex<()>>,
}

impl<C: TerminalConnector> SessionManager<C> {
    /// Create a manager for the terminal at `config`.
    ///
    /// The configuration is validated here, once, before any connection
    /// attempt is ever made.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Device`] if the configuration is invalid.
    pub fn new(connector: C, config: TerminalConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let gate = gate::for_address(&config.address());

        Ok(Self {
            connector,
            config,
            options: SessionOptions::default(),
            gate,
        })
    }

    /// Replace the default session options.
    #[must_use]
    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    /// The terminal configuration this manager serializes access to.
    #[must_use]
    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    /// Run `op` inside a full session bracket with the default deadline.
    ///
    /// See [`with_session_deadline`](Self::with_session_deadline).
    pub async fn with_session<T, E>(
        &self,
        op: impl AsyncFnOnce(&mut C::Conn) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<SessionError>,
    {
        self.with_session_deadline(self.options.acquire_timeout, op)
            .await
    }

    /// Run `op` inside a full session bracket.
    ///
    /// Acquires the terminal gate (bounded by `deadline`), connects with
    /// bounded retries, suspends the device, runs `op` with the live
    /// connection, resumes the device, and disconnects, in that order, on
    /// every path.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Timeout`] if the gate is not acquired in time;
    ///   the terminal is never touched in that case.
    /// - [`SessionError::Unreachable`] if all connection attempts fail.
    /// - [`SessionError::Busy`] if the device refuses to suspend.
    /// - Whatever `op` returns, unchanged: a failed resume after a failed
    ///   operation is logged, not returned.
    /// - [`SessionError::Transport`] if the resume fails after `op`
    ///   succeeded: the terminal can no longer be attested enabled, which
    ///   outranks the operation's result.
    pub async fn with_session_deadline<T, E>(
        &self,
        deadline: Duration,
        op: impl AsyncFnOnce(&mut C::Conn) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<SessionError>,
    {
        let address = self.config.address();

        debug!(%address, "waiting for session gate");
        let _guard = match tokio::time::timeout(deadline, self.gate.lock()).await {
            Ok(guard) => guard,
            Err(_) => {
                let waited_ms = deadline.as_millis() as u64;
                warn!(%address, waited_ms, "gave up waiting for session gate");
                return Err(SessionError::Timeout { waited_ms }.into());
            }
        };

        let mut conn = self.connect_with_retries().await.map_err(E::from)?;
        info!(%address, "session opened");

        if let Err(err) = conn.disable().await {
            let err = SessionError::from(err);
            warn!(%address, error = %err, "failed to suspend terminal");
            Self::teardown(conn, &address).await;
            return Err(err.into());
        }
        debug!(%address, "terminal suspended");

        let op_result = op(&mut conn).await;

        let enable_result = conn.enable().await;
        Self::teardown(conn, &address).await;

        match (op_result, enable_result) {
            (Ok(value), Ok(())) => {
                info!(%address, "session closed");
                Ok(value)
            }
            (Ok(_), Err(err)) => {
                // The operation worked, but the terminal may still be
                // suspended. That violates the contract that no call
                // leaves the device disabled, so it outranks the result.
                let err = SessionError::from(err);
                warn!(%address, error = %err, "failed to resume terminal");
                Err(err.into())
            }
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(enable_err)) => {
                warn!(
                    %address,
                    error = %enable_err,
                    "failed to resume terminal while unwinding"
                );
                Err(err)
            }
        }
    }

    /// Connect, retrying failed dials up to the configured bound.
    ///
    /// Only `Unreachable` is retried: any error past a successful dial
    /// means the device answered, and re-dialing could repeat side effects.
    async fn connect_with_retries(&self) -> Result<C::Conn, SessionError> {
        let mut attempt = 0;
        loop {
            match self.connector.connect(&self.config).await {
                Ok(conn) => return Ok(conn),
                Err(err) if err.is_connect_failure() && attempt < self.options.connect_retries => {
                    attempt += 1;
                    warn!(
                        address = %self.config.address(),
                        attempt,
                        retries = self.options.connect_retries,
                        error = %err,
                        "connection attempt failed, retrying"
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Best-effort disconnect; failure is logged, never propagated.
    async fn teardown(conn: C::Conn, address: &str) {
        if let Err(err) = conn.disconnect().await {
            warn!(%address, error = %err, "disconnect failed");
        }
    }
}
