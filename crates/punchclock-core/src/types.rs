use crate::{
    Result,
    constants::{
        MAX_EMPLOYEE_ID_LENGTH, MAX_NAME_LENGTH, MAX_PROMPT_INDEX, MAX_TEMPLATE_SLOT,
        PRIVILEGE_ADMIN_CODE, PRIVILEGE_STANDARD_CODE,
    },
    error::Error,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-assigned stable employee identifier.
///
/// Distinct from the terminal's internal numeric index: the employee id is
/// the reconciliation key chosen by the caller and must stay unique within
/// the device user table. The id is normalized (trimmed) before validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Create a new employee id with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidEmployeeId` if the id is empty after trimming,
    /// longer than 24 characters, non-ASCII, or contains whitespace.
    pub fn new(id: &str) -> Result<Self> {
        let id = id.trim();

        if id.is_empty() {
            return Err(Error::InvalidEmployeeId("must not be empty".to_string()));
        }
        if id.len() > MAX_EMPLOYEE_ID_LENGTH {
            return Err(Error::InvalidEmployeeId(format!(
                "must be at most {MAX_EMPLOYEE_ID_LENGTH} chars, got {}",
                id.len()
            )));
        }
        if !id.is_ascii() || id.chars().any(char::is_whitespace) {
            return Err(Error::InvalidEmployeeId(format!(
                "must be ASCII without whitespace: {id:?}"
            )));
        }

        Ok(EmployeeId(id.to_string()))
    }

    /// Get the employee id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for EmployeeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        EmployeeId::new(s)
    }
}

/// User privilege on the terminal.
///
/// Terminals store privilege as a numeric code. This toolkit exposes only
/// the two levels that matter for attendance management; any non-zero
/// device code is treated as administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Privilege {
    /// Regular user: can punch in and out, nothing else.
    Standard,

    /// Terminal administrator: full access to the device menu.
    Admin,
}

impl Privilege {
    /// Map a device privilege code to the two-level enum.
    ///
    /// Code 0 is a standard user; any non-zero code grants device menu
    /// access and is reported as `Admin`.
    #[inline]
    #[must_use]
    pub fn from_code(code: u8) -> Self {
        if code == PRIVILEGE_STANDARD_CODE {
            Privilege::Standard
        } else {
            Privilege::Admin
        }
    }

    /// Convert to the canonical device code (0 or 14).
    #[inline]
    #[must_use]
    pub fn to_code(self) -> u8 {
        match self {
            Privilege::Standard => PRIVILEGE_STANDARD_CODE,
            Privilege::Admin => PRIVILEGE_ADMIN_CODE,
        }
    }

    /// Parse a caller-supplied privilege label.
    ///
    /// Accepts `"admin"` for administrators and `"user"` or `"standard"`
    /// for regular users, case-insensitively.
    ///
    /// # Errors
    /// Returns `Error::UnknownPrivilegeLabel` for anything else.
    pub fn from_label(label: &str) -> Result<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Privilege::Admin),
            "user" | "standard" => Ok(Privilege::Standard),
            other => Err(Error::UnknownPrivilegeLabel(other.to_string())),
        }
    }

    /// Returns `true` for administrators.
    #[inline]
    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Privilege::Admin)
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Privilege::Standard => write!(f, "User"),
            Privilege::Admin => write!(f, "Admin"),
        }
    }
}

/// Fingerprint template slot (0-9).
///
/// Each user may hold up to ten fingerprint templates on the device; the
/// slot selects which one an enrollment writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateSlot(u8);

impl TemplateSlot {
    /// Create a template slot with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidTemplateSlot` if the slot is greater than 9.
    pub fn new(slot: u8) -> Result<Self> {
        if slot > MAX_TEMPLATE_SLOT {
            return Err(Error::InvalidTemplateSlot { slot });
        }
        Ok(TemplateSlot(slot))
    }

    /// Get the raw slot number.
    #[must_use]
    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for TemplateSlot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Audible voice prompt index (0-54).
///
/// Terminals carry a bank of pre-recorded voice clips addressed by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromptIndex(u8);

impl PromptIndex {
    /// The "thank you" confirmation clip, played after enrollment start.
    pub const THANK_YOU: PromptIndex = PromptIndex(0);

    /// Create a prompt index with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidPromptIndex` if the index is greater than 54.
    pub fn new(index: u8) -> Result<Self> {
        if index > MAX_PROMPT_INDEX {
            return Err(Error::InvalidPromptIndex { index });
        }
        Ok(PromptIndex(index))
    }

    /// Get the raw prompt index.
    #[must_use]
    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for PromptIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user record as managed by the directory reconciler.
///
/// `internal_id` is the terminal's own table index; `employee_id` is the
/// caller-assigned reconciliation key. The two must never be conflated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Device-assigned numeric index into the user table.
    pub internal_id: u16,

    /// Caller-assigned stable identifier, unique in the user table.
    pub employee_id: EmployeeId,

    /// User name as stored on the device (may be empty).
    pub name: String,

    /// Mapped privilege level.
    pub privilege: Privilege,

    /// Device password (possibly empty; written as-is, never verified here).
    pub password: String,

    /// Device group identifier (usually empty).
    pub group_id: String,
}

impl UserRecord {
    /// Name for presentation: the trimmed stored name, or `"Unknown"` when
    /// the device holds an empty or whitespace-only name.
    ///
    /// The underlying record is never rewritten; the fallback exists only
    /// at the presentation boundary.
    #[must_use]
    pub fn display_name(&self) -> &str {
        let trimmed = self.name.trim();
        if trimmed.is_empty() { "Unknown" } else { trimmed }
    }

    /// Validate a name for writing to the device.
    ///
    /// # Errors
    /// Returns `Error::InvalidName` if the name exceeds the device field
    /// width.
    pub fn validate_name(name: &str) -> Result<()> {
        if name.len() > MAX_NAME_LENGTH {
            return Err(Error::InvalidName(format!(
                "must be at most {MAX_NAME_LENGTH} chars, got {}",
                name.len()
            )));
        }
        Ok(())
    }
}

/// Punch classification reported by the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchKind {
    CheckIn,
    CheckOut,
    BreakOut,
    BreakIn,
    OvertimeIn,
    OvertimeOut,
    /// Unrecognized device punch code, preserved as-is.
    Other(u8),
}

impl PunchKind {
    /// Map a device punch code to its classification.
    #[inline]
    #[must_use]
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => PunchKind::CheckIn,
            1 => PunchKind::CheckOut,
            2 => PunchKind::BreakOut,
            3 => PunchKind::BreakIn,
            4 => PunchKind::OvertimeIn,
            5 => PunchKind::OvertimeOut,
            other => PunchKind::Other(other),
        }
    }

    /// Convert back to the device punch code.
    #[inline]
    #[must_use]
    pub fn to_code(self) -> u8 {
        match self {
            PunchKind::CheckIn => 0,
            PunchKind::CheckOut => 1,
            PunchKind::BreakOut => 2,
            PunchKind::BreakIn => 3,
            PunchKind::OvertimeIn => 4,
            PunchKind::OvertimeOut => 5,
            PunchKind::Other(code) => code,
        }
    }
}

/// A single clock event recorded by the terminal.
///
/// Punches are immutable once retrieved. Timestamps carry no zone: they are
/// whatever the terminal's local clock said at punch time, and are compared
/// only against the caller-requested calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchEvent {
    /// Employee the punch belongs to.
    pub employee_id: EmployeeId,

    /// Terminal-local timestamp of the punch.
    pub timestamp: NaiveDateTime,

    /// Punch classification.
    pub kind: PunchKind,

    /// Raw device status byte (verification mode).
    pub status: u8,
}
