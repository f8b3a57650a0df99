use chrono::NaiveDate;

use crate::model::leave::LeaveRecord;
use crate::scheduling::error::ScheduleError;
use crate::scheduling::store::LeaveStore;

use super::MySqlStore;

impl LeaveStore for MySqlStore {
    async fn approved_leaves_overlapping(
        &self,
        nik: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<LeaveRecord>, ScheduleError> {
        let leaves = sqlx::query_as::<_, LeaveRecord>(
            r#"
            SELECT id, nik, start_date, end_date, leave_type, status
            FROM leave_requests
            WHERE nik = ?
              AND status = 'approved'
              AND start_date <= ?
              AND end_date >= ?
            ORDER BY start_date
            "#,
        )
        .bind(nik)
        .bind(end)
        .bind(start)
        .fetch_all(&self.pool)
        .await?;
        Ok(leaves)
    }
}
