//! Clock-in/clock-out orchestration: the single call site for filing-date
//! selection, carry-over detection, shift resolution and window checks.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus, NewAttendance};
use crate::model::employee::Employee;
use crate::model::policy::AttendanceWindowPolicy;
use crate::model::schedule::ScheduleSourceTag;
use crate::model::shift::ShiftDefinition;

use super::carryover::find_open_record;
use super::error::{ClockError, ScheduleError};
use super::resolver::{resolve_shift, ShiftResolution};
use super::store::{AttendanceStore, ScheduleStore};
use super::window::{evaluate_window, ClockAction, DenyReason, WindowDecision};

/// The calendar date a clock request arriving at `now` should be filed
/// under.
///
/// Normally today. Past `early_arrival_cutoff` at night, with nothing
/// still open today, a request is filed under tomorrow when tomorrow's
/// shift starts early enough (at or before `early_arrival_floor`) — a
/// guard arriving at 22:30 for tomorrow's 05:00 shift files under
/// tomorrow.
pub async fn filing_date<S>(
    store: &S,
    policy: &AttendanceWindowPolicy,
    employee: &Employee,
    now: NaiveDateTime,
) -> Result<NaiveDate, ScheduleError>
where
    S: ScheduleStore + AttendanceStore,
{
    let today = now.date();
    if now.time() < policy.early_arrival_cutoff {
        return Ok(today);
    }
    if store.open_record_on(&employee.nik, today).await?.is_some() {
        return Ok(today);
    }

    let tomorrow = today + Duration::days(1);
    match resolve_shift(store, employee, tomorrow).await? {
        ShiftResolution::Scheduled { shift, .. }
            if shift.start_time <= policy.early_arrival_floor =>
        {
            Ok(tomorrow)
        }
        _ => Ok(today),
    }
}

/// Opens an attendance record for the employee, enforcing the
/// NONE → OPEN → CLOSED lifecycle and the clock-in window.
///
/// A locked-schedule employee with no resolvable shift is refused; an
/// unlocked one clocks in with no shift attached and no window check.
pub async fn clock_in<S>(
    store: &S,
    policy: &AttendanceWindowPolicy,
    employee: &Employee,
    now: NaiveDateTime,
) -> Result<AttendanceRecord, ClockError>
where
    S: ScheduleStore + AttendanceStore,
{
    let date = filing_date(store, policy, employee, now).await?;

    if find_open_record(store, &employee.nik, date).await?.is_some() {
        return Err(ClockError::AlreadyClockedIn);
    }

    let shift = match resolve_shift(store, employee, date).await? {
        ShiftResolution::Scheduled { shift, .. } => Some(shift),
        ShiftResolution::DayOff if employee.schedule_is_locked => {
            return Err(ClockError::NoScheduleToday);
        }
        ShiftResolution::DayOff => None,
    };

    if let Some(shift) = &shift {
        deny(evaluate_window(
            policy,
            employee,
            shift,
            date,
            ClockAction::In,
            now,
        ))?;
    }

    let new = NewAttendance {
        nik: employee.nik.clone(),
        date,
        shift_code: shift.as_ref().map(|s| s.code.clone()),
        status: AttendanceStatus::Present,
        clock_in: now,
        crosses_midnight: shift.as_ref().map(ShiftDefinition::spans_midnight).unwrap_or(false),
    };

    match store.insert_clock_in(&new).await {
        Ok(record) => Ok(record),
        // Lost the race against a concurrent clock-in from the same employee.
        Err(ScheduleError::DuplicateRecord) => Err(ClockError::AlreadyClockedIn),
        Err(e) => Err(e.into()),
    }
}

/// Closes the employee's open record, which may be dated yesterday when a
/// midnight-crossing shift ran past midnight.
pub async fn clock_out<S>(
    store: &S,
    policy: &AttendanceWindowPolicy,
    employee: &Employee,
    now: NaiveDateTime,
) -> Result<AttendanceRecord, ClockError>
where
    S: ScheduleStore + AttendanceStore,
{
    let Some(record) = find_open_record(store, &employee.nik, now.date()).await? else {
        return Err(ClockError::NotClockedIn);
    };

    match resolve_shift(store, employee, record.date).await? {
        ShiftResolution::Scheduled { shift, .. } => deny(evaluate_window(
            policy,
            employee,
            &shift,
            record.date,
            ClockAction::Out,
            now,
        ))?,
        ShiftResolution::DayOff => {
            // The roster or catalog changed under an open record. Closing it
            // beats trapping it open forever.
            warn!(
                nik = %employee.nik,
                date = %record.date,
                "closing attendance record with no resolvable shift"
            );
        }
    }

    let closed = store.close_record(record.id, now).await?;
    if closed == 0 {
        return Err(ClockError::NotClockedIn);
    }

    Ok(AttendanceRecord {
        clock_out: Some(now),
        ..record
    })
}

/// "What shift applies right now" view: an open record (today's or a
/// carry-over from yesterday) pins the answer to its own date, otherwise
/// the filing-date resolution stands.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CurrentStatus {
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub shift: Option<ShiftDefinition>,
    pub source: Option<ScheduleSourceTag>,
    pub open_record: Option<AttendanceRecord>,
}

pub async fn current_status<S>(
    store: &S,
    policy: &AttendanceWindowPolicy,
    employee: &Employee,
    now: NaiveDateTime,
) -> Result<CurrentStatus, ScheduleError>
where
    S: ScheduleStore + AttendanceStore,
{
    if let Some(open) = find_open_record(store, &employee.nik, now.date()).await? {
        let resolution = resolve_shift(store, employee, open.date).await?;
        return Ok(CurrentStatus {
            date: open.date,
            shift: resolution.shift().cloned(),
            source: resolution.source(),
            open_record: Some(open),
        });
    }

    let date = filing_date(store, policy, employee, now).await?;
    let resolution = resolve_shift(store, employee, date).await?;
    Ok(CurrentStatus {
        date,
        shift: resolution.shift().cloned(),
        source: resolution.source(),
        open_record: None,
    })
}

fn deny(decision: WindowDecision) -> Result<(), ClockError> {
    match decision {
        WindowDecision::Allowed => Ok(()),
        WindowDecision::Denied {
            reason: DenyReason::TooEarly,
            boundary,
        } => Err(ClockError::TooEarly { boundary }),
        WindowDecision::Denied {
            reason: DenyReason::WindowClosed,
            boundary,
        } => Err(ClockError::WindowClosed { boundary }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::fixtures::{
        at, date, locked_employee, night_shift, shift, unlocked_employee, MemoryStore,
    };

    fn policy() -> AttendanceWindowPolicy {
        AttendanceWindowPolicy::default()
    }

    #[actix_web::test]
    async fn clock_in_opens_a_record_with_the_crossing_flag_copied() {
        let mut store = MemoryStore::new();
        store.add_shift(night_shift("M"));
        let employee = locked_employee("G-1", None);
        store.add_override("G-1", date(2026, 2, 22), "M");

        let record = clock_in(&store, &policy(), &employee, at(2026, 2, 22, 19, 30))
            .await
            .unwrap();
        assert_eq!(record.date, date(2026, 2, 22));
        assert_eq!(record.shift_code.as_deref(), Some("M"));
        assert!(record.crosses_midnight);
        assert!(record.is_open());
    }

    #[actix_web::test]
    async fn clock_in_twice_is_rejected() {
        let mut store = MemoryStore::new();
        store.add_shift(night_shift("M"));
        let employee = locked_employee("G-1", None);
        store.add_override("G-1", date(2026, 2, 22), "M");

        clock_in(&store, &policy(), &employee, at(2026, 2, 22, 19, 30))
            .await
            .unwrap();
        let second = clock_in(&store, &policy(), &employee, at(2026, 2, 22, 20, 30)).await;
        assert!(matches!(second, Err(ClockError::AlreadyClockedIn)));
    }

    #[actix_web::test]
    async fn clock_in_during_open_carryover_is_rejected() {
        let mut store = MemoryStore::new();
        store.add_shift(night_shift("M"));
        store.add_shift(shift("P", 8, 16));
        let employee = locked_employee("G-1", None);
        store.seed_open_record("G-1", date(2026, 2, 22), Some("M"), at(2026, 2, 22, 20, 0), true);
        store.add_override("G-1", date(2026, 2, 23), "P");

        let attempt = clock_in(&store, &policy(), &employee, at(2026, 2, 23, 5, 30)).await;
        assert!(matches!(attempt, Err(ClockError::AlreadyClockedIn)));
    }

    #[actix_web::test]
    async fn locked_employee_without_shift_is_refused() {
        let store = MemoryStore::new();
        let employee = locked_employee("G-1", None);
        let attempt = clock_in(&store, &policy(), &employee, at(2026, 2, 22, 8, 0)).await;
        assert!(matches!(attempt, Err(ClockError::NoScheduleToday)));
    }

    #[actix_web::test]
    async fn unlocked_employee_without_shift_clocks_in_anyway() {
        let store = MemoryStore::new();
        let employee = unlocked_employee("G-1");
        let record = clock_in(&store, &policy(), &employee, at(2026, 2, 22, 3, 0))
            .await
            .unwrap();
        assert_eq!(record.shift_code, None);
        assert!(!record.crosses_midnight);
    }

    #[actix_web::test]
    async fn clock_in_outside_window_reports_the_boundary() {
        let mut store = MemoryStore::new();
        store.add_shift(night_shift("M"));
        let employee = locked_employee("G-1", None);
        store.add_override("G-1", date(2026, 2, 22), "M");

        let attempt = clock_in(&store, &policy(), &employee, at(2026, 2, 22, 12, 0)).await;
        match attempt {
            Err(ClockError::TooEarly { boundary }) => {
                assert_eq!(boundary, at(2026, 2, 22, 17, 0));
            }
            other => panic!("expected TooEarly, got {other:?}"),
        }
    }

    #[actix_web::test]
    async fn clock_out_closes_yesterdays_crossing_record() {
        let mut store = MemoryStore::new();
        store.add_shift(night_shift("M"));
        let employee = locked_employee("G-1", None);
        store.add_override("G-1", date(2026, 2, 22), "M");
        store.seed_open_record("G-1", date(2026, 2, 22), Some("M"), at(2026, 2, 22, 20, 0), true);

        let record = clock_out(&store, &policy(), &employee, at(2026, 2, 23, 6, 15))
            .await
            .unwrap();
        assert_eq!(record.date, date(2026, 2, 22));
        assert_eq!(record.clock_out, Some(at(2026, 2, 23, 6, 15)));
        assert!(store.open_count() == 0);
    }

    #[actix_web::test]
    async fn clock_out_without_open_record_is_rejected() {
        let store = MemoryStore::new();
        let employee = locked_employee("G-1", None);
        let attempt = clock_out(&store, &policy(), &employee, at(2026, 2, 22, 17, 0)).await;
        assert!(matches!(attempt, Err(ClockError::NotClockedIn)));
    }

    #[actix_web::test]
    async fn clock_out_before_shift_end_is_too_early() {
        let mut store = MemoryStore::new();
        store.add_shift(night_shift("M"));
        let employee = locked_employee("G-1", None);
        store.add_override("G-1", date(2026, 2, 22), "M");
        store.seed_open_record("G-1", date(2026, 2, 22), Some("M"), at(2026, 2, 22, 20, 0), true);

        let attempt = clock_out(&store, &policy(), &employee, at(2026, 2, 22, 23, 0)).await;
        match attempt {
            Err(ClockError::TooEarly { boundary }) => {
                assert_eq!(boundary, at(2026, 2, 23, 6, 0));
            }
            other => panic!("expected TooEarly, got {other:?}"),
        }
    }

    #[actix_web::test]
    async fn late_night_request_files_under_tomorrow_for_an_early_shift() {
        let mut store = MemoryStore::new();
        store.add_shift(shift("S", 5, 13)); // starts 05:00, before the floor
        let employee = locked_employee("G-1", None);
        store.add_override("G-1", date(2026, 2, 23), "S");

        // 22:30 is past the 21:00 cutoff and nothing is open today.
        let filed = filing_date(&store, &policy(), &employee, at(2026, 2, 22, 22, 30))
            .await
            .unwrap();
        assert_eq!(filed, date(2026, 2, 23));

        // Filing under tomorrow does not bypass the window: 22:30 is still
        // 6.5h before the 05:00 start, outside the 3h early allowance.
        let attempt = clock_in(&store, &policy(), &employee, at(2026, 2, 22, 22, 30)).await;
        assert!(matches!(attempt, Err(ClockError::TooEarly { .. })));

        let record = clock_in(&store, &policy(), &employee, at(2026, 2, 23, 2, 30))
            .await
            .unwrap();
        assert_eq!(record.date, date(2026, 2, 23));
    }

    #[actix_web::test]
    async fn late_night_request_stays_today_for_a_late_starting_shift() {
        let mut store = MemoryStore::new();
        store.add_shift(shift("P", 8, 16)); // starts past the floor
        let employee = locked_employee("G-1", None);
        store.add_override("G-1", date(2026, 2, 23), "P");

        let filed = filing_date(&store, &policy(), &employee, at(2026, 2, 22, 22, 30))
            .await
            .unwrap();
        assert_eq!(filed, date(2026, 2, 22));
    }

    #[actix_web::test]
    async fn current_status_substitutes_the_carryover_shift() {
        let mut store = MemoryStore::new();
        store.add_shift(night_shift("M"));
        store.add_shift(shift("P", 8, 16));
        let employee = locked_employee("G-1", None);
        store.add_override("G-1", date(2026, 2, 22), "M");
        store.add_override("G-1", date(2026, 2, 23), "P");
        store.seed_open_record("G-1", date(2026, 2, 22), Some("M"), at(2026, 2, 22, 20, 0), true);

        let status = current_status(&store, &policy(), &employee, at(2026, 2, 23, 5, 0))
            .await
            .unwrap();
        assert_eq!(status.date, date(2026, 2, 22));
        assert_eq!(status.shift.unwrap().code, "M");
        assert!(status.open_record.is_some());
    }
}
