use crate::model::employee::Employee;
use crate::scheduling::error::ScheduleError;

use super::MySqlStore;

impl MySqlStore {
    pub async fn employee_by_nik(&self, nik: &str) -> Result<Option<Employee>, ScheduleError> {
        // The legacy '1'/'0' lock flags were migrated to TINYINT(1); the
        // core only ever sees real booleans.
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT
                id,
                nik,
                full_name,
                branch_code,
                department_code,
                default_shift_code,
                schedule_is_locked,
                location_is_locked
            FROM employees
            WHERE nik = ?
            "#,
        )
        .bind(nik)
        .fetch_optional(&self.pool)
        .await?;
        Ok(employee)
    }
}
