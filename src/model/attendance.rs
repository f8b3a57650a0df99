use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceRecord {
    pub id: u64,

    #[schema(example = "G-0451")]
    pub nik: String,

    /// Calendar day the record is filed under (the clock-in day).
    #[schema(example = "2026-02-22", value_type = String, format = "date")]
    pub date: NaiveDate,

    /// Null for unlocked-schedule employees clocking in without a shift.
    #[schema(example = "M", nullable = true)]
    pub shift_code: Option<String>,

    #[schema(example = "present")]
    pub status: String,

    #[schema(example = "2026-02-22T20:05:00", value_type = String, format = "date-time", nullable = true)]
    pub clock_in: Option<NaiveDateTime>,

    #[schema(example = "2026-02-23T06:02:00", value_type = String, format = "date-time", nullable = true)]
    pub clock_out: Option<NaiveDateTime>,

    /// Copied from the resolved shift at clock-in time; the catalog may
    /// change afterwards, the record keeps what was true then.
    #[schema(example = true)]
    pub crosses_midnight: bool,
}

impl AttendanceRecord {
    pub fn is_open(&self) -> bool {
        self.clock_in.is_some() && self.clock_out.is_none()
    }
}

/// Fields the clock-in path writes; the row id and audit columns come back
/// from storage.
#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub nik: String,
    pub date: NaiveDate,
    pub shift_code: Option<String>,
    pub status: AttendanceStatus,
    pub clock_in: NaiveDateTime,
    pub crosses_midnight: bool,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::AsRefStr,
    strum_macros::EnumString,
    ToSchema,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Leave,
    Sick,
    Absent,
    Off,
    Scheduled,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn attendance_status_round_trips_as_snake_case() {
        assert_eq!(AttendanceStatus::Present.as_ref(), "present");
        assert_eq!(AttendanceStatus::Scheduled.to_string(), "scheduled");
        let parsed: AttendanceStatus = "sick".parse().unwrap();
        assert_eq!(parsed, AttendanceStatus::Sick);
    }

    #[test]
    fn open_record_requires_clock_in_without_clock_out() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 22).unwrap();
        let mut record = AttendanceRecord {
            id: 1,
            nik: "G-0451".into(),
            date,
            shift_code: Some("M".into()),
            status: "present".into(),
            clock_in: None,
            clock_out: None,
            crosses_midnight: true,
        };
        assert!(!record.is_open());

        record.clock_in = date.and_hms_opt(20, 5, 0);
        assert!(record.is_open());

        record.clock_out = date.and_hms_opt(23, 0, 0);
        assert!(!record.is_open());
    }
}
