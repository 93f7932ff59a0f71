//! Core constants for the punchclock attendance terminal toolkit.
//!
//! This module centralizes device-level constants shared by every crate in
//! the workspace: network defaults, privilege codes, field widths, and the
//! ranges accepted by the terminal for template slots and voice prompts.
//!
//! These values match the behavior of ZKTeco-compatible attendance
//! terminals. Changing them may break compatibility with deployed devices.

// ============================================================================
// Network Defaults
// ============================================================================

/// Default TCP port used by attendance terminals.
///
/// # Examples
///
/// ```
/// use punchclock_core::constants::DEFAULT_PORT;
///
/// assert_eq!(DEFAULT_PORT, 4370);
/// ```
pub const DEFAULT_PORT: u16 = 4370;

/// Default transport timeout in milliseconds.
///
/// Applies to connection establishment and to each read/write against the
/// terminal unless overridden in the configuration.
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

// ============================================================================
// Privilege Codes
// ============================================================================

/// Device code for a standard (non-admin) user.
pub const PRIVILEGE_STANDARD_CODE: u8 = 0;

/// Device code for a terminal administrator.
///
/// Terminals store privilege as a numeric code; any non-zero code grants
/// menu access on the device, with this value being the canonical
/// administrator code written by this toolkit.
pub const PRIVILEGE_ADMIN_CODE: u8 = 14;

// ============================================================================
// Field Widths
// ============================================================================

/// Maximum length of a caller-assigned employee identifier.
pub const MAX_EMPLOYEE_ID_LENGTH: usize = 24;

/// Maximum length of a user name as stored in the device user table.
///
/// Longer names are rejected rather than truncated so that what the caller
/// sees is always what the terminal displays.
pub const MAX_NAME_LENGTH: usize = 24;

/// Highest internal user index the device user table can hold.
pub const MAX_INTERNAL_ID: u16 = u16::MAX;

// ============================================================================
// Enrollment and Prompts
// ============================================================================

/// Highest fingerprint template slot per user (slots are 0-9).
pub const MAX_TEMPLATE_SLOT: u8 = 9;

/// Highest audible voice prompt index supported by the terminal.
///
/// Prompt indices 0 through this value select pre-recorded voice clips on
/// the device speaker.
pub const MAX_PROMPT_INDEX: u8 = 54;

/// Prompt index of the "thank you" confirmation clip.
///
/// Played after enrollment is initiated to signal the operator that the
/// terminal is ready for finger placement.
pub const PROMPT_THANK_YOU: u8 = 0;
