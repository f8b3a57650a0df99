use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Company-wide clock window configuration. Single row; administrative
/// updates happen elsewhere, this side only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "grace_in_hours": 4,
        "grace_out_hours": 6,
        "early_arrival_cutoff": "21:00:00",
        "early_arrival_floor": "06:00:00"
    })
)]
pub struct AttendanceWindowPolicy {
    /// Hours past the nominal shift end during which clock-in is still taken.
    #[schema(example = 4)]
    pub grace_in_hours: i64,

    /// Hours past the (possibly rolled) shift end during which clock-out is
    /// still taken.
    #[schema(example = 6)]
    pub grace_out_hours: i64,

    /// Requests at or past this wall-clock time may be filed under tomorrow.
    #[schema(example = "21:00:00", value_type = String, format = "time")]
    pub early_arrival_cutoff: NaiveTime,

    /// Tomorrow's shift must start at or before this time for the late-night
    /// filing rule to apply.
    #[schema(example = "06:00:00", value_type = String, format = "time")]
    pub early_arrival_floor: NaiveTime,
}

impl Default for AttendanceWindowPolicy {
    fn default() -> Self {
        Self {
            grace_in_hours: 4,
            grace_out_hours: 6,
            early_arrival_cutoff: NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
            early_arrival_floor: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
        }
    }
}
