//! Mock terminal implementation for testing and development.
//!
//! This module provides an in-memory attendance terminal that can be
//! scripted programmatically: seed the user table and punch log, inject
//! faults, and inspect operation counters afterwards. It implements the
//! same [`TerminalConnector`]/[`TerminalConnection`] contract as a real
//! vendor transport, so everything above the boundary runs unchanged
//! against it.

use crate::error::{Result, TerminalError};
use crate::traits::{TerminalConnection, TerminalConnector};
use crate::types::{DeviceUser, TerminalConfig};
use punchclock_core::{EmployeeId, PromptIndex, PunchEvent, TemplateSlot};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Which mock operation should fail on its next invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFault {
    Disable,
    Enable,
    Users,
    WriteUser,
    RemoveUser,
    Punches,
    Enroll,
    Prompt,
}

#[derive(Debug, Default)]
struct MockState {
    users: Vec<DeviceUser>,
    punches: Vec<PunchEvent>,
    enrollments: Vec<(u16, u8)>,
    prompts: Vec<u8>,
    connect_attempts: u32,
    refuse_connects: u32,
    disable_count: u32,
    enable_count: u32,
    disconnect_count: u32,
    fault: Option<MockFault>,
    busy_on_disable: bool,
    connected: bool,
    disabled: bool,
}

impl MockState {
    /// Consume a pending fault for `op`, failing the operation once.
    fn take_fault(&mut self, op: MockFault) -> Result<()> {
        if self.fault == Some(op) {
            self.fault = None;
            return Err(TerminalError::transport(format!(
                "injected fault: {op:?}"
            )));
        }
        Ok(())
    }
}

/// Scriptable in-memory terminal.
///
/// The terminal doubles as its own control handle: cloning it shares the
/// underlying state, so a test can keep one clone for scripting and hand
/// the other to the code under test as a connector.
///
/// # Examples
///
/// ```
/// use punchclock_terminal::{MockTerminal, TerminalConfig, TerminalConnection, TerminalConnector};
///
/// # async fn example() -> punchclock_terminal::Result<()> {
/// let terminal = MockTerminal::new();
/// let mut conn = terminal.connect(&TerminalConfig::new("10.0.0.1")).await?;
///
/// conn.disable().await?;
/// assert!(terminal.is_disabled());
/// conn.enable().await?;
/// conn.disconnect().await?;
///
/// assert_eq!(terminal.connect_attempts(), 1);
/// assert_eq!(terminal.disconnect_count(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockTerminal {
    state: Arc<Mutex<MockState>>,
}

impl MockTerminal {
    /// Create a mock terminal with an empty user table and punch log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // A panic while holding the lock poisons it; the state itself is
        // still coherent enough for test inspection.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seed a row into the device user table.
    pub fn seed_user(&self, user: DeviceUser) {
        self.lock().users.push(user);
    }

    /// Seed a punch into the device punch log.
    pub fn seed_punch(&self, punch: PunchEvent) {
        self.lock().punches.push(punch);
    }

    /// Refuse the next `n` connection attempts with `Unreachable`.
    pub fn refuse_next_connects(&self, n: u32) {
        self.lock().refuse_connects = n;
    }

    /// Make the named operation fail once with a transport error.
    pub fn inject_fault(&self, fault: MockFault) {
        self.lock().fault = Some(fault);
    }

    /// Report `Busy` on the next and all following `disable` calls.
    pub fn set_busy_on_disable(&self, busy: bool) {
        self.lock().busy_on_disable = busy;
    }

    /// Snapshot of the current user table.
    #[must_use]
    pub fn users_snapshot(&self) -> Vec<DeviceUser> {
        self.lock().users.clone()
    }

    /// Enrollment commands accepted so far, as `(internal_id, slot)`.
    #[must_use]
    pub fn enrollments(&self) -> Vec<(u16, u8)> {
        self.lock().enrollments.clone()
    }

    /// Voice prompt indices played so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<u8> {
        self.lock().prompts.clone()
    }

    /// Number of connection attempts, including refused ones.
    #[must_use]
    pub fn connect_attempts(&self) -> u32 {
        self.lock().connect_attempts
    }

    /// Number of `disable` attempts.
    #[must_use]
    pub fn disable_count(&self) -> u32 {
        self.lock().disable_count
    }

    /// Number of `enable` attempts.
    #[must_use]
    pub fn enable_count(&self) -> u32 {
        self.lock().enable_count
    }

    /// Number of completed disconnects.
    #[must_use]
    pub fn disconnect_count(&self) -> u32 {
        self.lock().disconnect_count
    }

    /// Whether the terminal is currently suspended.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.lock().disabled
    }

    /// Whether a connection is currently open.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.lock().connected
    }
}

impl TerminalConnector for MockTerminal {
    type Conn = MockConnection;

    async fn connect(&self, config: &TerminalConfig) -> Result<Self::Conn> {
        config.validate()?;

        let mut state = self.lock();
        state.connect_attempts += 1;

        if state.refuse_connects > 0 {
            state.refuse_connects -= 1;
            tracing::debug!(address = %config.address(), "mock refusing connection");
            return Err(TerminalError::unreachable(
                config.host.clone(),
                config.port,
                config.timeout_ms,
            ));
        }

        if state.connected {
            return Err(TerminalError::busy("connect"));
        }
        state.connected = true;

        Ok(MockConnection {
            state: Arc::clone(&self.state),
            open: true,
        })
    }
}

/// One live connection to a [`MockTerminal`].
#[derive(Debug)]
pub struct MockConnection {
    state: Arc<Mutex<MockState>>,
    open: bool,
}

impl MockConnection {
    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TerminalConnection for MockConnection {
    async fn disable(&mut self) -> Result<()> {
        let mut state = self.lock();
        state.disable_count += 1;
        if state.busy_on_disable {
            return Err(TerminalError::busy("disable"));
        }
        state.take_fault(MockFault::Disable)?;
        state.disabled = true;
        Ok(())
    }

    async fn enable(&mut self) -> Result<()> {
        let mut state = self.lock();
        state.enable_count += 1;
        state.take_fault(MockFault::Enable)?;
        state.disabled = false;
        Ok(())
    }

    async fn users(&mut self) -> Result<Vec<DeviceUser>> {
        let mut state = self.lock();
        state.take_fault(MockFault::Users)?;
        Ok(state.users.clone())
    }

    async fn write_user(&mut self, user: &DeviceUser) -> Result<()> {
        let mut state = self.lock();
        state.take_fault(MockFault::WriteUser)?;

        // The device overwrites by internal id, so an update keeps the
        // row's position in the table.
        if let Some(row) = state
            .users
            .iter_mut()
            .find(|row| row.internal_id == user.internal_id)
        {
            *row = user.clone();
        } else {
            state.users.push(user.clone());
        }
        Ok(())
    }

    async fn remove_user(&mut self, employee_id: &EmployeeId) -> Result<()> {
        let mut state = self.lock();
        state.take_fault(MockFault::RemoveUser)?;
        state.users.retain(|row| &row.employee_id != employee_id);
        Ok(())
    }

    async fn punches(&mut self) -> Result<Vec<PunchEvent>> {
        let mut state = self.lock();
        state.take_fault(MockFault::Punches)?;
        Ok(state.punches.clone())
    }

    async fn begin_enroll(&mut self, internal_id: u16, slot: TemplateSlot) -> Result<()> {
        let mut state = self.lock();
        state.take_fault(MockFault::Enroll)?;

        if !state.users.iter().any(|row| row.internal_id == internal_id) {
            return Err(TerminalError::invalid_record(format!(
                "no user with internal id {internal_id}"
            )));
        }
        state.enrollments.push((internal_id, slot.as_u8()));
        Ok(())
    }

    async fn play_prompt(&mut self, index: PromptIndex) -> Result<()> {
        let mut state = self.lock();
        state.take_fault(MockFault::Prompt)?;
        state.prompts.push(index.as_u8());
        Ok(())
    }

    async fn disconnect(mut self) -> Result<()> {
        self.open = false;
        let mut state = self.lock();
        state.connected = false;
        state.disconnect_count += 1;
        Ok(())
    }
}

impl Drop for MockConnection {
    fn drop(&mut self) {
        // A dropped connection releases the device even without a clean
        // disconnect, mirroring a TCP reset.
        if self.open {
            self.lock().connected = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn user(internal_id: u16, employee_id: &str, name: &str) -> DeviceUser {
        DeviceUser {
            internal_id,
            employee_id: EmployeeId::new(employee_id).unwrap(),
            name: name.to_string(),
            privilege_code: 0,
            password: String::new(),
            group_id: String::new(),
        }
    }

    fn punch(employee_id: &str, y: i32, m: u32, d: u32) -> PunchEvent {
        PunchEvent {
            employee_id: EmployeeId::new(employee_id).unwrap(),
            timestamp: NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(8, 30, 0)
                .unwrap(),
            kind: punchclock_core::PunchKind::CheckIn,
            status: 1,
        }
    }

    #[tokio::test]
    async fn test_seeded_table_roundtrip() {
        let terminal = MockTerminal::new();
        terminal.seed_user(user(1, "1", "Alice"));
        terminal.seed_punch(punch("1", 2024, 3, 5));

        let mut conn = terminal
            .connect(&TerminalConfig::new("10.0.0.1"))
            .await
            .unwrap();

        let users = conn.users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Alice");

        let punches = conn.punches().await.unwrap();
        assert_eq!(punches.len(), 1);

        conn.disconnect().await.unwrap();
    }

    #[tokio::test]
    async fn test_refused_connects() {
        let terminal = MockTerminal::new();
        terminal.refuse_next_connects(2);
        let config = TerminalConfig::new("10.0.0.1");

        assert!(matches!(
            terminal.connect(&config).await,
            Err(TerminalError::Unreachable { .. })
        ));
        assert!(matches!(
            terminal.connect(&config).await,
            Err(TerminalError::Unreachable { .. })
        ));
        assert!(terminal.connect(&config).await.is_ok());
        assert_eq!(terminal.connect_attempts(), 3);
    }

    #[tokio::test]
    async fn test_second_connection_is_busy() {
        let terminal = MockTerminal::new();
        let config = TerminalConfig::new("10.0.0.1");

        let conn = terminal.connect(&config).await.unwrap();
        assert!(matches!(
            terminal.connect(&config).await,
            Err(TerminalError::Busy { .. })
        ));

        conn.disconnect().await.unwrap();
        assert!(terminal.connect(&config).await.is_ok());
    }

    #[tokio::test]
    async fn test_drop_releases_connection() {
        let terminal = MockTerminal::new();
        let config = TerminalConfig::new("10.0.0.1");

        {
            let _conn = terminal.connect(&config).await.unwrap();
            assert!(terminal.is_connected());
        }
        assert!(!terminal.is_connected());
        assert_eq!(terminal.disconnect_count(), 0);
    }

    #[tokio::test]
    async fn test_fault_fires_once() {
        let terminal = MockTerminal::new();
        terminal.inject_fault(MockFault::Users);

        let mut conn = terminal
            .connect(&TerminalConfig::new("10.0.0.1"))
            .await
            .unwrap();

        assert!(conn.users().await.is_err());
        assert!(conn.users().await.is_ok());
    }

    #[tokio::test]
    async fn test_busy_on_disable() {
        let terminal = MockTerminal::new();
        terminal.set_busy_on_disable(true);

        let mut conn = terminal
            .connect(&TerminalConfig::new("10.0.0.1"))
            .await
            .unwrap();

        assert!(matches!(
            conn.disable().await,
            Err(TerminalError::Busy { .. })
        ));
        assert_eq!(terminal.disable_count(), 1);
    }

    #[tokio::test]
    async fn test_write_user_overwrites_by_internal_id() {
        let terminal = MockTerminal::new();
        terminal.seed_user(user(1, "1", "Alice"));

        let mut conn = terminal
            .connect(&TerminalConfig::new("10.0.0.1"))
            .await
            .unwrap();

        conn.write_user(&user(1, "1", "Alice B.")).await.unwrap();
        conn.write_user(&user(2, "2", "Bob")).await.unwrap();

        let users = conn.users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name, "Alice B.");
    }

    #[tokio::test]
    async fn test_enroll_requires_known_internal_id() {
        let terminal = MockTerminal::new();
        terminal.seed_user(user(7, "7", "Gina"));

        let mut conn = terminal
            .connect(&TerminalConfig::new("10.0.0.1"))
            .await
            .unwrap();

        let slot = TemplateSlot::new(2).unwrap();
        assert!(conn.begin_enroll(99, slot).await.is_err());
        conn.begin_enroll(7, slot).await.unwrap();

        assert_eq!(terminal.enrollments(), vec![(7, 2)]);
    }
}
