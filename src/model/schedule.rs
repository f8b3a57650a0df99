use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which schedule source produced a resolution. Ordering here is the
/// cascade priority, strongest first.
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
pub enum ScheduleSourceTag {
    /// Ad hoc swap/overtime/extra assignment for one exact date.
    Override,
    /// Published monthly roster; owns every day of its month.
    Roster,
    /// Personal recurring weekday pattern.
    Recurring,
    /// Branch+department weekday fallback.
    DepartmentDefault,
    /// Shift code stored directly on the employee row.
    EmployeeDefault,
}
