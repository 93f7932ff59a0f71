//! User directory reconciliation for attendance terminals.
//!
//! The device user table is the system of record for who may punch: this
//! crate enforces employee-id uniqueness, maps the device's numeric
//! privilege codes onto the two-level [`punchclock_core::Privilege`] enum,
//! and routes every create/update/delete through the session manager's
//! suspend/resume bracket. Mutations return the refreshed full user list
//! so callers never need a second round trip to show consistent state.
//!
//! Punch retrieval lives here too ([`Directory::fetch_punches`]): it is a
//! bracketed, request-scoped read that feeds the pure aggregation engine
//! in `punchclock-attendance`.

pub mod error;
pub mod reconciler;

pub use error::{ReconcileError, Result};
pub use reconciler::{Directory, NewUser, UserUpdate};
