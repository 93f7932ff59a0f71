//! User directory reconciliation against the device user table.
//!
//! The terminal is the system of record: every operation here opens a
//! session, works on the live table, and returns the refreshed state.
//! Nothing is cached between calls.
//!
//! Reads run inside the same suspend/resume bracket as mutations. That
//! costs a little latency, but guarantees a concurrent enrollment can
//! never partially overlap a table read.

use crate::error::{ReconcileError, Result};
use punchclock_core::{EmployeeId, Privilege, PunchEvent, UserRecord};
use punchclock_session::{SessionError, SessionManager};
use punchclock_terminal::{DeviceUser, TerminalConnection, TerminalConnector};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Input for creating a user on the device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Caller-assigned stable identifier; must be unique on the device.
    pub employee_id: EmployeeId,

    /// User name as it should appear on the terminal.
    pub name: String,

    /// Device password (may be empty).
    #[serde(default)]
    pub password: String,

    /// Privilege level; standard unless stated otherwise.
    pub privilege: Privilege,

    /// Explicit internal id. When omitted, the next free index is used;
    /// when supplied, it must not collide with an existing row.
    #[serde(default)]
    pub internal_id: Option<u16>,
}

/// Partial update applied to an existing device user.
///
/// `None` fields keep their current device value; the internal id and
/// group are never touched by an update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub password: Option<String>,
    pub privilege: Option<Privilege>,
}

/// Reconciles caller intent with the live device user table.
///
/// All operations run through the session manager, so they hold the
/// terminal's mutual-exclusion gate for their whole bracket and come back
/// with typed errors.
pub struct Directory<C: TerminalConnector> {
    sessions: SessionManager<C>,
}

impl<C: TerminalConnector> Directory<C> {
    /// Create a directory over an existing session manager.
    pub fn new(sessions: SessionManager<C>) -> Self {
        Self { sessions }
    }

    /// The session manager this directory operates through.
    #[must_use]
    pub fn sessions(&self) -> &SessionManager<C> {
        &self.sessions
    }

    /// Fetch the full user table with privileges mapped.
    ///
    /// # Errors
    ///
    /// Session failures pass through with their classification intact.
    pub async fn list_users(&self) -> Result<Vec<UserRecord>> {
        self.sessions
            .with_session(async |conn| {
                let rows = conn.users().await.map_err(SessionError::from)?;
                Ok(rows.into_iter().map(to_record).collect())
            })
            .await
    }

    /// Create a user, enforcing employee id uniqueness.
    ///
    /// Returns the refreshed full user list on success so callers can
    /// present consistent state without a second round trip.
    ///
    /// # Errors
    ///
    /// - [`ReconcileError::DuplicateId`] if the employee id is already in
    ///   the table; the table is left unchanged.
    /// - [`ReconcileError::InternalIdTaken`] if a caller-supplied internal
    ///   id collides with an existing row.
    /// - [`ReconcileError::InternalIdExhausted`] if the table is full.
    pub async fn create_user(&self, new: NewUser) -> Result<Vec<UserRecord>> {
        UserRecord::validate_name(&new.name)?;
        let employee_id = new.employee_id.clone();

        let created = self
            .sessions
            .with_session(async |conn| {
                let rows = conn.users().await.map_err(SessionError::from)?;

                if rows.iter().any(|row| row.employee_id == new.employee_id) {
                    return Err(ReconcileError::DuplicateId {
                        employee_id: new.employee_id.clone(),
                    });
                }

                let internal_id = match new.internal_id {
                    Some(id) => {
                        if rows.iter().any(|row| row.internal_id == id) {
                            return Err(ReconcileError::InternalIdTaken { internal_id: id });
                        }
                        id
                    }
                    None => next_internal_id(&rows)?,
                };

                let row = DeviceUser {
                    internal_id,
                    employee_id: new.employee_id.clone(),
                    name: new.name.clone(),
                    privilege_code: new.privilege.to_code(),
                    password: new.password.clone(),
                    group_id: String::new(),
                };
                conn.write_user(&row).await.map_err(SessionError::from)?;

                let refreshed = conn.users().await.map_err(SessionError::from)?;
                Ok(refreshed.into_iter().map(to_record).collect::<Vec<_>>())
            })
            .await?;

        info!(%employee_id, "user created");
        Ok(created)
    }

    /// Update an existing user in place on the device.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::NotFound`] if the employee id is absent.
    pub async fn update_user(
        &self,
        employee_id: &EmployeeId,
        update: UserUpdate,
    ) -> Result<Vec<UserRecord>> {
        if let Some(name) = &update.name {
            UserRecord::validate_name(name)?;
        }

        self.sessions
            .with_session(async |conn| {
                let rows = conn.users().await.map_err(SessionError::from)?;

                let Some(row) = rows.iter().find(|row| &row.employee_id == employee_id) else {
                    return Err(ReconcileError::NotFound {
                        employee_id: employee_id.clone(),
                    });
                };

                let mut row = row.clone();
                if let Some(name) = update.name {
                    row.name = name;
                }
                if let Some(password) = update.password {
                    row.password = password;
                }
                if let Some(privilege) = update.privilege {
                    row.privilege_code = privilege.to_code();
                }
                conn.write_user(&row).await.map_err(SessionError::from)?;
                info!(%employee_id, "user updated");

                let refreshed = conn.users().await.map_err(SessionError::from)?;
                Ok(refreshed.into_iter().map(to_record).collect())
            })
            .await
    }

    /// Delete a user from the device table.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::NotFound`] if the employee id is absent.
    pub async fn delete_user(&self, employee_id: &EmployeeId) -> Result<Vec<UserRecord>> {
        self.sessions
            .with_session(async |conn| {
                let rows = conn.users().await.map_err(SessionError::from)?;

                if !rows.iter().any(|row| &row.employee_id == employee_id) {
                    return Err(ReconcileError::NotFound {
                        employee_id: employee_id.clone(),
                    });
                }

                conn.remove_user(employee_id)
                    .await
                    .map_err(SessionError::from)?;
                info!(%employee_id, "user deleted");

                let refreshed = conn.users().await.map_err(SessionError::from)?;
                Ok(refreshed.into_iter().map(to_record).collect())
            })
            .await
    }

    /// Retrieve the raw punch log, request-scoped.
    ///
    /// Nothing is accumulated between calls: each retrieval reflects the
    /// device log at that moment and is discarded when the caller is done
    /// with it.
    pub async fn fetch_punches(&self) -> Result<Vec<PunchEvent>> {
        self.sessions
            .with_session(async |conn| {
                let punches = conn.punches().await.map_err(SessionError::from)?;
                info!(count = punches.len(), "retrieved punch log");
                Ok(punches)
            })
            .await
    }
}

/// Map a raw device row to the reconciled record.
fn to_record(row: DeviceUser) -> UserRecord {
    UserRecord {
        internal_id: row.internal_id,
        employee_id: row.employee_id,
        name: row.name,
        privilege: Privilege::from_code(row.privilege_code),
        password: row.password,
        group_id: row.group_id,
    }
}

/// Next free internal id: one past the highest in use.
fn next_internal_id(rows: &[DeviceUser]) -> Result<u16> {
    match rows.iter().map(|row| row.internal_id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or(ReconcileError::InternalIdExhausted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(internal_id: u16, employee_id: &str, privilege_code: u8) -> DeviceUser {
        DeviceUser {
            internal_id,
            employee_id: EmployeeId::new(employee_id).unwrap(),
            name: String::new(),
            privilege_code,
            password: String::new(),
            group_id: String::new(),
        }
    }

    #[test]
    fn test_to_record_maps_privilege() {
        let record = to_record(row(1, "1", 14));
        assert_eq!(record.privilege, Privilege::Admin);

        let record = to_record(row(2, "2", 0));
        assert_eq!(record.privilege, Privilege::Standard);
    }

    #[test]
    fn test_next_internal_id() {
        assert_eq!(next_internal_id(&[]).unwrap(), 1);
        assert_eq!(
            next_internal_id(&[row(1, "1", 0), row(5, "5", 0)]).unwrap(),
            6
        );
        assert!(matches!(
            next_internal_id(&[row(u16::MAX, "x", 0)]),
            Err(ReconcileError::InternalIdExhausted)
        ));
    }
}
