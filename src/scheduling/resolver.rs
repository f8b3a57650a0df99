//! The priority cascade across the five schedule sources.

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::warn;

use crate::model::employee::Employee;
use crate::model::schedule::ScheduleSourceTag;
use crate::model::shift::ShiftDefinition;

use super::error::ScheduleError;
use super::store::ScheduleStore;

/// Cascade order, strongest source first.
pub const CASCADE: [ScheduleSourceTag; 5] = [
    ScheduleSourceTag::Override,
    ScheduleSourceTag::Roster,
    ScheduleSourceTag::Recurring,
    ScheduleSourceTag::DepartmentDefault,
    ScheduleSourceTag::EmployeeDefault,
];

#[derive(Debug, Clone, PartialEq)]
pub enum ShiftResolution {
    Scheduled {
        shift: ShiftDefinition,
        source: ScheduleSourceTag,
    },
    /// No shift applies: either a deliberate day off under an authoritative
    /// source, or no source matched at all.
    DayOff,
}

impl ShiftResolution {
    pub fn shift(&self) -> Option<&ShiftDefinition> {
        match self {
            ShiftResolution::Scheduled { shift, .. } => Some(shift),
            ShiftResolution::DayOff => None,
        }
    }

    pub fn source(&self) -> Option<ScheduleSourceTag> {
        match self {
            ShiftResolution::Scheduled { source, .. } => Some(*source),
            ShiftResolution::DayOff => None,
        }
    }
}

pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// One source's verdict for the date.
enum Step {
    /// Source assigns this code; stop the cascade.
    Hit(String),
    /// Source has nothing to say; try the next one.
    Pass,
    /// Source owns the date: `Some` assigns, `None` is a deliberate day off
    /// and every weaker source is suppressed.
    Authoritative(Option<String>),
}

/// Resolves which shift, if any, applies to `employee` on `date`.
///
/// A roster published anywhere in the month owns the whole month: days it
/// does not list are days off, even when a recurring or department row
/// would otherwise match. Recurring and department sources behave the same
/// way within their own scope.
pub async fn resolve_shift<S: ScheduleStore>(
    store: &S,
    employee: &Employee,
    date: NaiveDate,
) -> Result<ShiftResolution, ScheduleError> {
    for source in CASCADE {
        let step = match source {
            ScheduleSourceTag::Override => {
                match store.override_shift_code(&employee.nik, date).await? {
                    Some(code) => Step::Hit(code),
                    None => Step::Pass,
                }
            }
            ScheduleSourceTag::Roster => {
                if store
                    .has_roster_in_month(&employee.nik, date.year(), date.month())
                    .await?
                {
                    Step::Authoritative(store.roster_shift_code(&employee.nik, date).await?)
                } else {
                    Step::Pass
                }
            }
            ScheduleSourceTag::Recurring => {
                if store.has_recurring(&employee.nik).await? {
                    Step::Authoritative(
                        store
                            .recurring_shift_code(&employee.nik, weekday_name(date))
                            .await?,
                    )
                } else {
                    Step::Pass
                }
            }
            ScheduleSourceTag::DepartmentDefault => {
                if store
                    .department_has_schedule(&employee.branch_code, &employee.department_code)
                    .await?
                {
                    Step::Authoritative(
                        store
                            .department_shift_code(
                                &employee.branch_code,
                                &employee.department_code,
                                weekday_name(date),
                            )
                            .await?,
                    )
                } else {
                    Step::Pass
                }
            }
            ScheduleSourceTag::EmployeeDefault => match employee.default_shift_code.clone() {
                Some(code) => Step::Hit(code),
                None => Step::Pass,
            },
        };

        match step {
            Step::Pass => continue,
            Step::Hit(code) | Step::Authoritative(Some(code)) => {
                return into_resolution(store, employee, date, code, source).await;
            }
            Step::Authoritative(None) => return Ok(ShiftResolution::DayOff),
        }
    }

    Ok(ShiftResolution::DayOff)
}

/// Catalog lookup for a resolved code. A dangling code is a data-integrity
/// problem, not a fault: log it and treat the day as unscheduled.
async fn into_resolution<S: ScheduleStore>(
    store: &S,
    employee: &Employee,
    date: NaiveDate,
    code: String,
    source: ScheduleSourceTag,
) -> Result<ShiftResolution, ScheduleError> {
    match store.shift_by_code(&code).await? {
        Some(shift) => Ok(ShiftResolution::Scheduled { shift, source }),
        None => {
            warn!(
                nik = %employee.nik,
                date = %date,
                shift_code = %code,
                source = %source,
                "schedule names a shift code missing from the catalog"
            );
            Ok(ShiftResolution::DayOff)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schedule::ScheduleSourceTag;
    use crate::scheduling::fixtures::{date, locked_employee, night_shift, shift, MemoryStore};

    #[actix_web::test]
    async fn override_beats_every_other_source() {
        let mut store = MemoryStore::new();
        store.add_shift(shift("P", 8, 16));
        store.add_shift(night_shift("M"));
        let employee = locked_employee("G-1", Some("P"));
        let day = date(2026, 2, 22);

        store.add_override("G-1", day, "M");
        store.add_roster("G-1", day, "P");
        store.add_recurring("G-1", "sunday", "P");

        let resolution = resolve_shift(&store, &employee, day).await.unwrap();
        assert_eq!(resolution.source(), Some(ScheduleSourceTag::Override));
        assert_eq!(resolution.shift().unwrap().code, "M");
    }

    #[actix_web::test]
    async fn roster_row_wins_over_recurring_and_defaults() {
        let mut store = MemoryStore::new();
        store.add_shift(shift("P", 8, 16));
        store.add_shift(night_shift("M"));
        let employee = locked_employee("G-1", Some("P"));
        let day = date(2026, 2, 22);

        store.add_roster("G-1", day, "M");
        store.add_recurring("G-1", "sunday", "P");

        let resolution = resolve_shift(&store, &employee, day).await.unwrap();
        assert_eq!(resolution.source(), Some(ScheduleSourceTag::Roster));
        assert_eq!(resolution.shift().unwrap().code, "M");
    }

    #[actix_web::test]
    async fn roster_anywhere_in_month_suppresses_weaker_sources() {
        let mut store = MemoryStore::new();
        store.add_shift(shift("P", 8, 16));
        let employee = locked_employee("G-1", Some("P"));

        // Roster published for Feb 10 only; Feb 22 is a Sunday with a
        // matching recurring row and an employee default.
        store.add_roster("G-1", date(2026, 2, 10), "P");
        store.add_recurring("G-1", "sunday", "P");

        let resolution = resolve_shift(&store, &employee, date(2026, 2, 22))
            .await
            .unwrap();
        assert_eq!(resolution, ShiftResolution::DayOff);

        // A different month is untouched by the February roster.
        let march = resolve_shift(&store, &employee, date(2026, 3, 1))
            .await
            .unwrap();
        assert_eq!(march.source(), Some(ScheduleSourceTag::Recurring));
    }

    #[actix_web::test]
    async fn recurring_miss_is_a_day_off_not_a_fallthrough() {
        let mut store = MemoryStore::new();
        store.add_shift(shift("P", 8, 16));
        let employee = locked_employee("G-1", Some("P"));

        store.add_recurring("G-1", "monday", "P");
        store.add_department("JKT01", "SECURITY", "sunday", "P");

        // 2026-02-22 is a Sunday: the employee has recurring rows, none for
        // sunday, so the department mapping must not be consulted.
        let resolution = resolve_shift(&store, &employee, date(2026, 2, 22))
            .await
            .unwrap();
        assert_eq!(resolution, ShiftResolution::DayOff);
    }

    #[actix_web::test]
    async fn department_then_employee_default_fallbacks() {
        let mut store = MemoryStore::new();
        store.add_shift(shift("P", 8, 16));
        store.add_shift(night_shift("M"));
        let employee = locked_employee("G-1", Some("M"));

        store.add_department("JKT01", "SECURITY", "sunday", "P");
        let resolution = resolve_shift(&store, &employee, date(2026, 2, 22))
            .await
            .unwrap();
        assert_eq!(
            resolution.source(),
            Some(ScheduleSourceTag::DepartmentDefault)
        );

        // Without any department mapping the default code on the employee
        // row is the last resort.
        let bare = MemoryStore::with_shifts(vec![night_shift("M")]);
        let resolution = resolve_shift(&bare, &employee, date(2026, 2, 22))
            .await
            .unwrap();
        assert_eq!(resolution.source(), Some(ScheduleSourceTag::EmployeeDefault));
        assert_eq!(resolution.shift().unwrap().code, "M");
    }

    #[actix_web::test]
    async fn dangling_shift_code_resolves_as_day_off() {
        let mut store = MemoryStore::new();
        let employee = locked_employee("G-1", None);
        store.add_override("G-1", date(2026, 2, 22), "GONE");

        let resolution = resolve_shift(&store, &employee, date(2026, 2, 22))
            .await
            .unwrap();
        assert_eq!(resolution, ShiftResolution::DayOff);
    }

    #[actix_web::test]
    async fn no_source_at_all_is_a_day_off() {
        let store = MemoryStore::new();
        let employee = locked_employee("G-1", None);
        let resolution = resolve_shift(&store, &employee, date(2026, 2, 22))
            .await
            .unwrap();
        assert_eq!(resolution, ShiftResolution::DayOff);
    }
}
