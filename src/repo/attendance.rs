use chrono::{NaiveDate, NaiveDateTime};

use crate::model::attendance::{AttendanceRecord, NewAttendance};
use crate::scheduling::error::ScheduleError;
use crate::scheduling::store::AttendanceStore;

use super::MySqlStore;

const RECORD_COLUMNS: &str =
    "id, nik, date, shift_code, status, clock_in, clock_out, crosses_midnight";

impl AttendanceStore for MySqlStore {
    async fn record_on(
        &self,
        nik: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, ScheduleError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM attendance_records WHERE nik = ? AND date = ? LIMIT 1"
        ))
        .bind(nik)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn open_record_on(
        &self,
        nik: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, ScheduleError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
            r#"
            SELECT {RECORD_COLUMNS}
            FROM attendance_records
            WHERE nik = ? AND date = ?
              AND clock_in IS NOT NULL AND clock_out IS NULL
            LIMIT 1
            "#
        ))
        .bind(nik)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn insert_clock_in(
        &self,
        new: &NewAttendance,
    ) -> Result<AttendanceRecord, ScheduleError> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance_records
                (nik, date, shift_code, status, clock_in, crosses_midnight)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new.nik)
        .bind(new.date)
        .bind(&new.shift_code)
        .bind(new.status.as_ref())
        .bind(new.clock_in)
        .bind(new.crosses_midnight)
        .execute(&self.pool)
        .await;

        let result = match result {
            Ok(r) => r,
            Err(e) => {
                // The unique (nik, date) key is what makes concurrent
                // clock-ins safe; surface it as a typed collision.
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.code().as_deref() == Some("23000") {
                        return Err(ScheduleError::DuplicateRecord);
                    }
                }
                return Err(e.into());
            }
        };

        Ok(AttendanceRecord {
            id: result.last_insert_id(),
            nik: new.nik.clone(),
            date: new.date,
            shift_code: new.shift_code.clone(),
            status: new.status.to_string(),
            clock_in: Some(new.clock_in),
            clock_out: None,
            crosses_midnight: new.crosses_midnight,
        })
    }

    async fn close_record(&self, id: u64, clock_out: NaiveDateTime) -> Result<u64, ScheduleError> {
        let result = sqlx::query(
            r#"
            UPDATE attendance_records
            SET clock_out = ?
            WHERE id = ? AND clock_out IS NULL
            "#,
        )
        .bind(clock_out)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
