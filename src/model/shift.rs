use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "code": "M",
        "name": "Malam",
        "start_time": "20:00:00",
        "end_time": "06:00:00",
        "crosses_midnight": true,
        "duration_hours": 10.0
    })
)]
pub struct ShiftDefinition {
    #[schema(example = "M")]
    pub code: String,

    #[schema(example = "Malam")]
    pub name: String,

    #[schema(example = "20:00:00", value_type = String, format = "time")]
    pub start_time: NaiveTime,

    #[schema(example = "06:00:00", value_type = String, format = "time")]
    pub end_time: NaiveTime,

    /// Shift ends on the calendar day after it starts ("lintas hari").
    #[schema(example = true)]
    pub crosses_midnight: bool,

    #[schema(example = 10.0)]
    pub duration_hours: f64,
}

impl ShiftDefinition {
    /// The window end falls on the next calendar day. Covers rows where the
    /// flag was never set but the times make it obvious.
    pub fn spans_midnight(&self) -> bool {
        self.crosses_midnight || self.end_time <= self.start_time
    }
}
