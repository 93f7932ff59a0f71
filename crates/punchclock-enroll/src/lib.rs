//! Fingerprint enrollment coordination for attendance terminals.
//!
//! [`Enroller`] drives the device-side initiation of biometric capture:
//! it resolves the employee to the terminal's internal index, starts
//! enrollment for a template slot, and triggers the audible confirmation
//! prompt, all inside one session bracket. What it returns is an
//! [`EnrollmentTicket`] with status `initiated`: the capture itself is
//! asynchronous hardware interaction completed by a human at the
//! terminal, and its completion is not observable from here.

pub mod coordinator;
pub mod error;

pub use coordinator::{Enroller, EnrollmentStatus, EnrollmentTicket};
pub use error::{EnrollError, Result};
