//! Concrete clock windows for a resolved shift on a reference date.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use derive_more::Display;

use crate::model::employee::Employee;
use crate::model::policy::AttendanceWindowPolicy;
use crate::model::shift::ShiftDefinition;

/// Fixed early-arrival allowance before the nominal shift start.
pub const EARLY_CLOCK_IN_HOURS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockAction {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DenyReason {
    #[display(fmt = "too early")]
    TooEarly,
    #[display(fmt = "window closed")]
    WindowClosed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WindowDecision {
    Allowed,
    /// The boundary is the concrete instant the request needed to meet.
    Denied {
        reason: DenyReason,
        boundary: NaiveDateTime,
    },
}

impl WindowDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, WindowDecision::Allowed)
    }
}

/// Nominal [start, end) instants of `shift` filed under `date`. The end
/// rolls into the next calendar day for midnight-crossing shifts.
pub fn shift_window(shift: &ShiftDefinition, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(shift.start_time);
    let mut end = date.and_time(shift.end_time);
    if shift.spans_midnight() {
        end += Duration::days(1);
    }
    (start, end)
}

/// Whether `action` is currently permitted against `shift` filed under
/// `date`.
///
/// Windows are only enforced for locked-schedule employees. Clock-in is
/// taken from three hours before the start until `grace_in_hours` past the
/// end; clock-out from the nominal end until `grace_out_hours` past it. The
/// far boundary is exclusive: at exactly `end + grace` the window has
/// closed.
pub fn evaluate_window(
    policy: &AttendanceWindowPolicy,
    employee: &Employee,
    shift: &ShiftDefinition,
    date: NaiveDate,
    action: ClockAction,
    now: NaiveDateTime,
) -> WindowDecision {
    if !employee.schedule_is_locked {
        return WindowDecision::Allowed;
    }

    let (start, end) = shift_window(shift, date);

    match action {
        ClockAction::In => {
            let earliest = start - Duration::hours(EARLY_CLOCK_IN_HOURS);
            let latest = end + Duration::hours(policy.grace_in_hours);
            if now < earliest {
                WindowDecision::Denied {
                    reason: DenyReason::TooEarly,
                    boundary: earliest,
                }
            } else if now >= latest {
                WindowDecision::Denied {
                    reason: DenyReason::WindowClosed,
                    boundary: latest,
                }
            } else {
                WindowDecision::Allowed
            }
        }
        ClockAction::Out => {
            let latest = end + Duration::hours(policy.grace_out_hours);
            if now < end {
                WindowDecision::Denied {
                    reason: DenyReason::TooEarly,
                    boundary: end,
                }
            } else if now >= latest {
                WindowDecision::Denied {
                    reason: DenyReason::WindowClosed,
                    boundary: latest,
                }
            } else {
                WindowDecision::Allowed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::policy::AttendanceWindowPolicy;
    use crate::scheduling::fixtures::{at, date, locked_employee, night_shift, shift, unlocked_employee};

    fn policy() -> AttendanceWindowPolicy {
        AttendanceWindowPolicy::default()
    }

    #[test]
    fn midnight_crossing_window_rolls_the_end() {
        let night = night_shift("M"); // 20:00 - 06:00
        let (start, end) = shift_window(&night, date(2026, 2, 22));
        assert_eq!(start, at(2026, 2, 22, 20, 0));
        assert_eq!(end, at(2026, 2, 23, 6, 0));
    }

    #[test]
    fn clock_out_of_night_shift_next_morning_is_allowed() {
        let employee = locked_employee("G-1", None);
        let night = night_shift("M");
        let day = date(2026, 2, 22);

        let decision = evaluate_window(
            &policy(),
            &employee,
            &night,
            day,
            ClockAction::Out,
            at(2026, 2, 23, 5, 30),
        );
        assert!(decision.is_allowed());

        let decision = evaluate_window(
            &policy(),
            &employee,
            &night,
            day,
            ClockAction::Out,
            at(2026, 2, 22, 23, 0),
        );
        assert_eq!(
            decision,
            WindowDecision::Denied {
                reason: DenyReason::TooEarly,
                boundary: at(2026, 2, 23, 6, 0),
            }
        );
    }

    #[test]
    fn clock_out_grace_boundary_is_exclusive() {
        let employee = locked_employee("G-1", None);
        let night = night_shift("M");
        let day = date(2026, 2, 22);
        // End 06:00 + 6h grace = 12:00 on the 23rd.
        let boundary = at(2026, 2, 23, 12, 0);

        let just_before = boundary - Duration::seconds(1);
        assert!(
            evaluate_window(&policy(), &employee, &night, day, ClockAction::Out, just_before)
                .is_allowed()
        );

        assert_eq!(
            evaluate_window(&policy(), &employee, &night, day, ClockAction::Out, boundary),
            WindowDecision::Denied {
                reason: DenyReason::WindowClosed,
                boundary,
            }
        );
    }

    #[test]
    fn clock_in_opens_three_hours_before_start() {
        let employee = locked_employee("G-1", None);
        let morning = shift("P", 8, 16);
        let day = date(2026, 2, 22);

        assert!(
            evaluate_window(
                &policy(),
                &employee,
                &morning,
                day,
                ClockAction::In,
                at(2026, 2, 22, 5, 0)
            )
            .is_allowed()
        );

        assert_eq!(
            evaluate_window(
                &policy(),
                &employee,
                &morning,
                day,
                ClockAction::In,
                at(2026, 2, 22, 4, 59)
            ),
            WindowDecision::Denied {
                reason: DenyReason::TooEarly,
                boundary: at(2026, 2, 22, 5, 0),
            }
        );
    }

    #[test]
    fn clock_in_closes_after_grace_past_shift_end() {
        let employee = locked_employee("G-1", None);
        let morning = shift("P", 8, 16);
        let day = date(2026, 2, 22);
        // End 16:00 + 4h grace = 20:00.
        assert!(
            evaluate_window(
                &policy(),
                &employee,
                &morning,
                day,
                ClockAction::In,
                at(2026, 2, 22, 19, 59)
            )
            .is_allowed()
        );
        assert_eq!(
            evaluate_window(
                &policy(),
                &employee,
                &morning,
                day,
                ClockAction::In,
                at(2026, 2, 22, 20, 0)
            ),
            WindowDecision::Denied {
                reason: DenyReason::WindowClosed,
                boundary: at(2026, 2, 22, 20, 0),
            }
        );
    }

    #[test]
    fn unlocked_schedule_bypasses_every_window_check() {
        let employee = unlocked_employee("G-1");
        let night = night_shift("M");
        let day = date(2026, 2, 22);

        // A time far outside any window.
        let decision = evaluate_window(
            &policy(),
            &employee,
            &night,
            day,
            ClockAction::Out,
            at(2026, 2, 25, 12, 0),
        );
        assert!(decision.is_allowed());
    }
}
