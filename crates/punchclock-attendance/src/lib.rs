//! Attendance aggregation engine.
//!
//! Pure transformation of raw punch events into per-user monthly presence
//! grids. This crate never touches a terminal: callers retrieve punches
//! and the user directory through the session-managed crates and hand the
//! data in; everything here is synchronous, deterministic computation that
//! can run entirely outside the device's critical section.
//!
//! # Examples
//!
//! ```
//! use punchclock_attendance::{build_monthly_grid, days_in_month};
//!
//! assert_eq!(days_in_month(2024, 2).unwrap(), 29);
//!
//! let grids = build_monthly_grid(&[], &[], 2024, 3).unwrap();
//! assert!(grids.is_empty());
//! ```

pub mod calendar;
pub mod grid;

pub use calendar::{CalendarError, days_in_month};
pub use grid::{
    AttendanceGrid, DayMark, MonthlyRow, build_monthly_grid, monthly_rows, punches_in_month,
};
