//! Detection of an unfinished shift that started the previous day.

use chrono::{Duration, NaiveDate};

use crate::model::attendance::AttendanceRecord;

use super::error::ScheduleError;
use super::store::AttendanceStore;

/// Finds the attendance record a clock action should operate on as of
/// `as_of`: today's open record first, else yesterday's open record when it
/// was flagged midnight-crossing at clock-in time. A non-crossing record
/// left open yesterday is stale data, not a carry-over.
pub async fn find_open_record<S: AttendanceStore>(
    store: &S,
    nik: &str,
    as_of: NaiveDate,
) -> Result<Option<AttendanceRecord>, ScheduleError> {
    if let Some(open) = store.open_record_on(nik, as_of).await? {
        return Ok(Some(open));
    }

    let yesterday = as_of - Duration::days(1);
    Ok(store
        .open_record_on(nik, yesterday)
        .await?
        .filter(|record| record.crosses_midnight))
}
