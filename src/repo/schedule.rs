use chrono::NaiveDate;

use crate::model::shift::ShiftDefinition;
use crate::scheduling::error::ScheduleError;
use crate::scheduling::store::ScheduleStore;
use crate::utils::shift_cache;

use super::MySqlStore;

impl ScheduleStore for MySqlStore {
    async fn override_shift_code(
        &self,
        nik: &str,
        date: NaiveDate,
    ) -> Result<Option<String>, ScheduleError> {
        let code = sqlx::query_scalar::<_, String>(
            r#"
            SELECT shift_code
            FROM schedule_overrides
            WHERE nik = ? AND date = ?
            LIMIT 1
            "#,
        )
        .bind(nik)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(code)
    }

    async fn roster_shift_code(
        &self,
        nik: &str,
        date: NaiveDate,
    ) -> Result<Option<String>, ScheduleError> {
        let code = sqlx::query_scalar::<_, String>(
            r#"
            SELECT shift_code
            FROM roster_entries
            WHERE nik = ? AND date = ?
            LIMIT 1
            "#,
        )
        .bind(nik)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(code)
    }

    async fn has_roster_in_month(
        &self,
        nik: &str,
        year: i32,
        month: u32,
    ) -> Result<bool, ScheduleError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM roster_entries
            WHERE nik = ? AND YEAR(date) = ? AND MONTH(date) = ?
            "#,
        )
        .bind(nik)
        .bind(year)
        .bind(month)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    async fn recurring_shift_code(
        &self,
        nik: &str,
        weekday: &str,
    ) -> Result<Option<String>, ScheduleError> {
        let code = sqlx::query_scalar::<_, String>(
            r#"
            SELECT shift_code
            FROM recurring_schedules
            WHERE nik = ? AND weekday = ?
            LIMIT 1
            "#,
        )
        .bind(nik)
        .bind(weekday)
        .fetch_optional(&self.pool)
        .await?;
        Ok(code)
    }

    async fn has_recurring(&self, nik: &str) -> Result<bool, ScheduleError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM recurring_schedules WHERE nik = ?",
        )
        .bind(nik)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    async fn department_shift_code(
        &self,
        branch: &str,
        department: &str,
        weekday: &str,
    ) -> Result<Option<String>, ScheduleError> {
        // Department defaults hang off a schedule group per (branch,
        // department); the day rows carry the weekday mapping.
        let code = sqlx::query_scalar::<_, String>(
            r#"
            SELECT d.shift_code
            FROM department_schedule_groups g
            JOIN department_schedule_days d ON d.group_id = g.id
            WHERE g.branch_code = ? AND g.department_code = ? AND d.weekday = ?
            LIMIT 1
            "#,
        )
        .bind(branch)
        .bind(department)
        .bind(weekday)
        .fetch_optional(&self.pool)
        .await?;
        Ok(code)
    }

    async fn department_has_schedule(
        &self,
        branch: &str,
        department: &str,
    ) -> Result<bool, ScheduleError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM department_schedule_groups
            WHERE branch_code = ? AND department_code = ?
            "#,
        )
        .bind(branch)
        .bind(department)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    async fn shift_by_code(&self, code: &str) -> Result<Option<ShiftDefinition>, ScheduleError> {
        if let Some(shift) = shift_cache::get(code).await {
            return Ok(Some(shift));
        }

        let shift = sqlx::query_as::<_, ShiftDefinition>(
            r#"
            SELECT code, name, start_time, end_time, crosses_midnight, duration_hours
            FROM shifts
            WHERE code = ?
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(shift) = &shift {
            shift_cache::put(shift.clone()).await;
        }
        Ok(shift)
    }
}
