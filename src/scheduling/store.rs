//! Read/write contract the engine needs from relational storage.
//!
//! Lookups are scoped by employee plus an exact date or a weekday name and
//! return `None`/empty when nothing matches; "not found" is never an error.

use chrono::{NaiveDate, NaiveDateTime};

use crate::model::attendance::{AttendanceRecord, NewAttendance};
use crate::model::leave::LeaveRecord;
use crate::model::shift::ShiftDefinition;

use super::error::ScheduleError;

/// The five overlapping schedule sources plus the shift catalog.
pub trait ScheduleStore {
    /// Ad hoc per-date assignment (swap/overtime/extra shift).
    async fn override_shift_code(
        &self,
        nik: &str,
        date: NaiveDate,
    ) -> Result<Option<String>, ScheduleError>;

    /// Published roster row for one exact date.
    async fn roster_shift_code(
        &self,
        nik: &str,
        date: NaiveDate,
    ) -> Result<Option<String>, ScheduleError>;

    /// Whether any roster row exists for the employee anywhere in the month.
    async fn has_roster_in_month(
        &self,
        nik: &str,
        year: i32,
        month: u32,
    ) -> Result<bool, ScheduleError>;

    /// Personal recurring pattern, keyed by lowercase weekday name.
    async fn recurring_shift_code(
        &self,
        nik: &str,
        weekday: &str,
    ) -> Result<Option<String>, ScheduleError>;

    /// Whether the employee has any recurring row at all.
    async fn has_recurring(&self, nik: &str) -> Result<bool, ScheduleError>;

    /// Department fallback, keyed by branch + department + weekday name.
    async fn department_shift_code(
        &self,
        branch: &str,
        department: &str,
        weekday: &str,
    ) -> Result<Option<String>, ScheduleError>;

    /// Whether the department carries a weekday schedule group at all.
    async fn department_has_schedule(
        &self,
        branch: &str,
        department: &str,
    ) -> Result<bool, ScheduleError>;

    /// Shift catalog lookup.
    async fn shift_by_code(&self, code: &str) -> Result<Option<ShiftDefinition>, ScheduleError>;
}

/// Attendance record lifecycle: one row per (nik, date), created on
/// clock-in, closed once on clock-out, never written a third time.
pub trait AttendanceStore {
    async fn record_on(
        &self,
        nik: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, ScheduleError>;

    /// The record for the date, only if clock-in is set and clock-out is not.
    async fn open_record_on(
        &self,
        nik: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, ScheduleError>;

    /// Inserts the clock-in row. A duplicate (nik, date) must surface as
    /// [`ScheduleError::DuplicateRecord`] so concurrent clock-ins stay safe.
    async fn insert_clock_in(
        &self,
        new: &NewAttendance,
    ) -> Result<AttendanceRecord, ScheduleError>;

    /// Sets clock-out on a still-open record. Returns the number of rows
    /// closed (zero when another request already closed it).
    async fn close_record(
        &self,
        id: u64,
        clock_out: NaiveDateTime,
    ) -> Result<u64, ScheduleError>;
}

/// Approved leave, read-only, for the monthly projection.
pub trait LeaveStore {
    async fn approved_leaves_overlapping(
        &self,
        nik: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<LeaveRecord>, ScheduleError>;
}
