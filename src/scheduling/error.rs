use chrono::NaiveDateTime;
use derive_more::Display;

/// Failures crossing the storage seam.
#[derive(Debug, Display)]
pub enum ScheduleError {
    #[display(fmt = "storage error: {}", _0)]
    Storage(sqlx::Error),

    /// Unique-key collision on (nik, date); a concurrent clock-in won the race.
    #[display(fmt = "attendance record already exists for this date")]
    DuplicateRecord,
}

impl std::error::Error for ScheduleError {}

impl From<sqlx::Error> for ScheduleError {
    fn from(e: sqlx::Error) -> Self {
        ScheduleError::Storage(e)
    }
}

/// User-facing denials of a clock action, plus the storage passthrough.
/// Everything except `Storage` is recoverable by the employee.
#[derive(Debug, Display)]
pub enum ClockError {
    #[display(fmt = "no shift scheduled for this date")]
    NoScheduleToday,

    #[display(fmt = "already clocked in")]
    AlreadyClockedIn,

    #[display(fmt = "no open clock-in found")]
    NotClockedIn,

    #[display(fmt = "window opens at {}", boundary)]
    TooEarly { boundary: NaiveDateTime },

    #[display(fmt = "window closed at {}", boundary)]
    WindowClosed { boundary: NaiveDateTime },

    #[display(fmt = "{}", _0)]
    Storage(ScheduleError),
}

impl std::error::Error for ClockError {}

impl From<ScheduleError> for ClockError {
    fn from(e: ScheduleError) -> Self {
        ClockError::Storage(e)
    }
}
