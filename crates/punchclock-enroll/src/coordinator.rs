//! Fingerprint enrollment coordination.
//!
//! Enrollment is a multi-step handshake split across two worlds: this
//! system issues the device-side initiation, but the biometric capture
//! itself is finished by a human at the terminal. The coordinator cannot
//! observe that completion (there is no callback and no poll), so a
//! successful call means *initiated*, nothing more. The returned ticket
//! says exactly that.

use crate::error::{EnrollError, Result};
use chrono::{DateTime, Utc};
use punchclock_core::{EmployeeId, PromptIndex, TemplateSlot};
use punchclock_session::{SessionError, SessionManager};
use punchclock_terminal::{TerminalConnection, TerminalConnector};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

/// Lifecycle state of an enrollment as far as this system can see.
///
/// There is deliberately only one variant: completion happens on the
/// device, outside our observation. Callers that need a completed
/// fingerprint must verify it on the terminal itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Initiated,
}

/// Receipt for a successfully initiated enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentTicket {
    /// Unique id of this initiation, for caller-side correlation.
    pub ticket_id: Uuid,

    /// Employee the enrollment was started for.
    pub employee_id: EmployeeId,

    /// Internal device index the enrollment targets.
    pub internal_id: u16,

    /// Template slot being written.
    pub slot: TemplateSlot,

    /// When the device accepted the initiation.
    pub initiated_at: DateTime<Utc>,

    /// Always [`EnrollmentStatus::Initiated`].
    pub status: EnrollmentStatus,
}

/// Drives the device-side half of the enrollment handshake.
pub struct Enroller<C: TerminalConnector> {
    sessions: SessionManager<C>,
}

impl<C: TerminalConnector> Enroller<C> {
    /// Create an enroller over an existing session manager.
    pub fn new(sessions: SessionManager<C>) -> Self {
        Self { sessions }
    }

    /// Start fingerprint enrollment for an employee.
    ///
    /// Inside one session bracket: resolves the employee id against the
    /// live user table, issues the enrollment-start command for the
    /// resolved internal id, and plays the audible confirmation prompt.
    /// The prompt is a courtesy: if it fails, the enrollment has already
    /// been accepted by the device and the ticket is still returned.
    ///
    /// # Errors
    ///
    /// - [`EnrollError::UserNotFound`] if the employee id is not in the
    ///   device user table; the enrollment command is never issued.
    /// - [`EnrollError::Session`] for transport failures, classified by
    ///   the session manager.
    pub async fn begin_enrollment(
        &self,
        employee_id: &EmployeeId,
        slot: TemplateSlot,
    ) -> Result<EnrollmentTicket> {
        let ticket = self
            .sessions
            .with_session(async |conn| {
                let rows = conn.users().await.map_err(SessionError::from)?;

                let Some(row) = rows.iter().find(|row| &row.employee_id == employee_id) else {
                    return Err(EnrollError::UserNotFound {
                        employee_id: employee_id.clone(),
                    });
                };

                conn.begin_enroll(row.internal_id, slot)
                    .await
                    .map_err(SessionError::from)?;

                if let Err(err) = conn.play_prompt(PromptIndex::THANK_YOU).await {
                    warn!(%employee_id, error = %err, "confirmation prompt failed");
                }

                Ok(EnrollmentTicket {
                    ticket_id: Uuid::new_v4(),
                    employee_id: employee_id.clone(),
                    internal_id: row.internal_id,
                    slot,
                    initiated_at: Utc::now(),
                    status: EnrollmentStatus::Initiated,
                })
            })
            .await?;

        info!(
            %employee_id,
            internal_id = ticket.internal_id,
            slot = %ticket.slot,
            "enrollment initiated; capture completes at the terminal"
        );
        Ok(ticket)
    }

    /// Play an arbitrary voice prompt on the terminal speaker.
    ///
    /// Runs inside a full session bracket like every other device
    /// operation.
    pub async fn play_prompt(&self, index: PromptIndex) -> Result<()> {
        self.sessions
            .with_session(async |conn| {
                conn.play_prompt(index).await.map_err(SessionError::from)?;
                Ok::<_, EnrollError>(())
            })
            .await
    }
}
