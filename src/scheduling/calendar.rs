//! Month-at-a-time projection of schedule, attendance and leave.

use chrono::{Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::employee::Employee;
use crate::model::leave::LeaveRecord;

use super::error::ScheduleError;
use super::resolver::{resolve_shift, weekday_name, ShiftResolution};
use super::store::{AttendanceStore, LeaveStore, ScheduleStore};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DayView {
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "sunday")]
    pub weekday: String,

    #[schema(example = "M", nullable = true)]
    pub shift_code: Option<String>,

    #[schema(example = "Malam", nullable = true)]
    pub shift_name: Option<String>,

    #[schema(value_type = String, format = "time", nullable = true)]
    pub scheduled_in: Option<NaiveTime>,

    #[schema(value_type = String, format = "time", nullable = true)]
    pub scheduled_out: Option<NaiveTime>,

    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub actual_in: Option<NaiveDateTime>,

    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub actual_out: Option<NaiveDateTime>,

    #[schema(example = "present")]
    pub status: String,
}

/// Walks the month day by day, resolving the applicable shift and merging
/// in actual attendance and approved leave.
///
/// An attendance record always wins the status cell; leave shows only on
/// days without one. Resolution never fails a day: ambiguity renders as a
/// day off. An invalid year/month yields an empty projection.
pub async fn project_month<S>(
    store: &S,
    employee: &Employee,
    year: i32,
    month: u32,
) -> Result<Vec<DayView>, ScheduleError>
where
    S: ScheduleStore + AttendanceStore + LeaveStore,
{
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Ok(Vec::new());
    };
    let next_month = first + Months::new(1);
    let last = next_month - Duration::days(1);

    let leaves = store
        .approved_leaves_overlapping(&employee.nik, first, last)
        .await?;

    let mut days = Vec::with_capacity(31);
    let mut date = first;
    while date < next_month {
        let resolution = resolve_shift(store, employee, date).await?;
        let record = store.record_on(&employee.nik, date).await?;
        let leave = leaves.iter().find(|l| l.covers(date));
        days.push(day_view(date, &resolution, record, leave));
        date += Duration::days(1);
    }

    Ok(days)
}

fn day_view(
    date: NaiveDate,
    resolution: &ShiftResolution,
    record: Option<AttendanceRecord>,
    leave: Option<&LeaveRecord>,
) -> DayView {
    let shift = resolution.shift();

    let status = if let Some(record) = &record {
        record.status.clone()
    } else if let Some(leave) = leave {
        leave.leave_type.clone()
    } else if shift.is_some() {
        AttendanceStatus::Scheduled.to_string()
    } else {
        AttendanceStatus::Off.to_string()
    };

    DayView {
        date,
        weekday: weekday_name(date).to_string(),
        shift_code: shift.map(|s| s.code.clone()),
        shift_name: shift.map(|s| s.name.clone()),
        scheduled_in: shift.map(|s| s.start_time),
        scheduled_out: shift.map(|s| s.end_time),
        actual_in: record.as_ref().and_then(|r| r.clock_in),
        actual_out: record.as_ref().and_then(|r| r.clock_out),
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::fixtures::{at, date, locked_employee, night_shift, shift, MemoryStore};

    #[actix_web::test]
    async fn attendance_record_wins_over_the_override_nominal_times() {
        let mut store = MemoryStore::new();
        store.add_shift(night_shift("M"));
        store.add_shift(shift("P", 8, 16));
        let employee = locked_employee("G-1", Some("P"));

        let day = date(2026, 2, 22);
        store.add_override("G-1", day, "M");
        store.seed_open_record("G-1", day, Some("M"), at(2026, 2, 22, 20, 5), true);
        store.close_at(at(2026, 2, 23, 6, 2));

        let days = project_month(&store, &employee, 2026, 2).await.unwrap();
        let view = days.iter().find(|d| d.date == day).unwrap();

        assert_eq!(view.shift_code.as_deref(), Some("M"));
        assert_eq!(view.scheduled_in, Some(night_shift("M").start_time));
        assert_eq!(view.actual_in, Some(at(2026, 2, 22, 20, 5)));
        assert_eq!(view.actual_out, Some(at(2026, 2, 23, 6, 2)));
        assert_eq!(view.status, "present");
    }

    #[actix_web::test]
    async fn leave_shows_only_on_days_without_a_record() {
        let mut store = MemoryStore::new();
        store.add_shift(shift("P", 8, 16));
        let employee = locked_employee("G-1", Some("P"));

        store.add_leave("G-1", date(2026, 2, 10), date(2026, 2, 12), "sick");
        store.seed_open_record("G-1", date(2026, 2, 11), Some("P"), at(2026, 2, 11, 8, 0), false);

        let days = project_month(&store, &employee, 2026, 2).await.unwrap();
        assert_eq!(days.len(), 28);

        let on_leave = days.iter().find(|d| d.date == date(2026, 2, 10)).unwrap();
        assert_eq!(on_leave.status, "sick");
        assert!(on_leave.actual_in.is_none());

        let worked = days.iter().find(|d| d.date == date(2026, 2, 11)).unwrap();
        assert_eq!(worked.status, "present");
    }

    #[actix_web::test]
    async fn roster_gaps_render_as_days_off_across_the_month() {
        let mut store = MemoryStore::new();
        store.add_shift(shift("P", 8, 16));
        let employee = locked_employee("G-1", Some("P"));

        store.add_roster("G-1", date(2026, 2, 10), "P");

        let days = project_month(&store, &employee, 2026, 2).await.unwrap();
        let rostered = days.iter().find(|d| d.date == date(2026, 2, 10)).unwrap();
        assert_eq!(rostered.shift_code.as_deref(), Some("P"));
        assert_eq!(rostered.status, "scheduled");

        let gap = days.iter().find(|d| d.date == date(2026, 2, 11)).unwrap();
        assert_eq!(gap.shift_code, None);
        assert_eq!(gap.status, "off");
    }
}
