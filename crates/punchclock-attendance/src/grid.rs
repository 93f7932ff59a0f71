//! Monthly presence grid construction.
//!
//! Folds an unordered stream of raw punch events into a deterministic
//! per-user, per-day presence grid for one calendar month. Pure
//! computation with no clock, no device, and no hidden state: identical
//! inputs always produce identical grids.

use crate::calendar::{CalendarError, days_in_month};
use chrono::Datelike;
use punchclock_core::{EmployeeId, PunchEvent, PunchKind, UserRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Presence marker for one calendar day.
///
/// A day is `Present` iff at least one punch for that user falls on it in
/// the requested month; `Absent` is the default, not an omission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayMark {
    #[serde(rename = "P")]
    Present,

    #[serde(rename = "A")]
    Absent,
}

impl DayMark {
    /// The tabular cell letter (`P` / `A`).
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            DayMark::Present => 'P',
            DayMark::Absent => 'A',
        }
    }

    /// Returns `true` for `Present`.
    #[must_use]
    pub fn is_present(self) -> bool {
        matches!(self, DayMark::Present)
    }
}

impl fmt::Display for DayMark {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Per-user presence grid for one month.
///
/// `days` always holds exactly `days_in_month(year, month)` entries,
/// indexed from day 1 at position 0. Grids are derived data: regenerated
/// per request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceGrid {
    /// Employee the grid belongs to.
    pub employee_id: EmployeeId,

    /// Presentation name ("Unknown" when the identity cannot be resolved).
    pub display_name: String,

    /// One mark per day of the month, day 1 first.
    pub days: Vec<DayMark>,
}

impl AttendanceGrid {
    fn new_absent(employee_id: EmployeeId, display_name: String, days: usize) -> Self {
        Self {
            employee_id,
            display_name,
            days: vec![DayMark::Absent; days],
        }
    }

    /// Whether the 1-based `day` is marked present. Out-of-range days are
    /// reported absent.
    #[must_use]
    pub fn is_present(&self, day: u32) -> bool {
        day >= 1
            && self
                .days
                .get((day - 1) as usize)
                .is_some_and(|mark| mark.is_present())
    }

    /// Number of days marked present.
    #[must_use]
    pub fn present_days(&self) -> usize {
        self.days.iter().filter(|mark| mark.is_present()).count()
    }
}

/// Punches whose terminal-local timestamp falls in `(year, month)`.
pub fn punches_in_month(
    punches: &[PunchEvent],
    year: i32,
    month: u32,
) -> impl Iterator<Item = &PunchEvent> {
    punches
        .iter()
        .filter(move |punch| punch.timestamp.year() == year && punch.timestamp.month() == month)
}

/// Build the monthly presence grids for every known user and every puncher.
///
/// Grids are emitted in the order users are supplied (first occurrence
/// wins for a duplicated id); punches for an employee id with no user
/// record still surface as a grid named `"Unknown"`, appended in order of
/// first appearance; attendance is preserved even for an unresolvable
/// identity. A user with zero matching punches keeps an all-absent grid.
///
/// # Errors
/// Returns a [`CalendarError`] for an invalid target month or year.
///
/// # Examples
///
/// ```
/// use punchclock_attendance::build_monthly_grid;
///
/// let grids = build_monthly_grid(&[], &[], 2024, 2).unwrap();
/// assert!(grids.is_empty());
/// ```
pub fn build_monthly_grid(
    punches: &[PunchEvent],
    users: &[UserRecord],
    year: i32,
    month: u32,
) -> Result<Vec<AttendanceGrid>, CalendarError> {
    let day_count = days_in_month(year, month)? as usize;

    let mut grids: Vec<AttendanceGrid> = Vec::with_capacity(users.len());
    let mut by_id: HashMap<EmployeeId, usize> = HashMap::with_capacity(users.len());

    for user in users {
        if by_id.contains_key(&user.employee_id) {
            continue;
        }
        by_id.insert(user.employee_id.clone(), grids.len());
        grids.push(AttendanceGrid::new_absent(
            user.employee_id.clone(),
            user.display_name().to_string(),
            day_count,
        ));
    }

    for punch in punches_in_month(punches, year, month) {
        let index = match by_id.get(&punch.employee_id) {
            Some(&index) => index,
            None => {
                let index = grids.len();
                by_id.insert(punch.employee_id.clone(), index);
                grids.push(AttendanceGrid::new_absent(
                    punch.employee_id.clone(),
                    "Unknown".to_string(),
                    day_count,
                ));
                index
            }
        };

        // Idempotent OR: a second punch on the same day changes nothing.
        grids[index].days[(punch.timestamp.day() - 1) as usize] = DayMark::Present;
    }

    Ok(grids)
}

/// One month-filtered raw punch, joined with its user's display name.
///
/// This is the row shape tabular consumers (CSV export, views) work from;
/// the formatting itself is theirs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRow {
    pub employee_id: EmployeeId,
    pub display_name: String,
    pub timestamp: chrono::NaiveDateTime,
    pub kind: PunchKind,
    pub status: u8,
}

/// Month-filtered punch rows with usernames resolved.
///
/// Rows keep the punch log's order; an employee id with no user record
/// resolves to `"Unknown"` rather than being dropped.
///
/// # Errors
/// Returns a [`CalendarError`] for an invalid target month or year.
pub fn monthly_rows(
    punches: &[PunchEvent],
    users: &[UserRecord],
    year: i32,
    month: u32,
) -> Result<Vec<MonthlyRow>, CalendarError> {
    days_in_month(year, month)?;

    let names: HashMap<&EmployeeId, &str> = users
        .iter()
        .map(|user| (&user.employee_id, user.display_name()))
        .collect();

    Ok(punches_in_month(punches, year, month)
        .map(|punch| MonthlyRow {
            employee_id: punch.employee_id.clone(),
            display_name: names
                .get(&punch.employee_id)
                .copied()
                .unwrap_or("Unknown")
                .to_string(),
            timestamp: punch.timestamp,
            kind: punch.kind,
            status: punch.status,
        })
        .collect())
}
