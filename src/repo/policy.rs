use crate::model::policy::AttendanceWindowPolicy;
use crate::scheduling::error::ScheduleError;

use super::MySqlStore;

impl MySqlStore {
    /// Reads the singleton window policy row; a missing row falls back to
    /// the built-in defaults.
    pub async fn window_policy(&self) -> Result<AttendanceWindowPolicy, ScheduleError> {
        let policy = sqlx::query_as::<_, AttendanceWindowPolicy>(
            r#"
            SELECT grace_in_hours, grace_out_hours, early_arrival_cutoff, early_arrival_floor
            FROM attendance_policy
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(policy.unwrap_or_default())
    }
}
