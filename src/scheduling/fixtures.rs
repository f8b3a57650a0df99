//! In-memory store and builders shared by the engine tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::attendance::{AttendanceRecord, NewAttendance};
use crate::model::employee::Employee;
use crate::model::leave::LeaveRecord;
use crate::model::shift::ShiftDefinition;

use super::error::ScheduleError;
use super::store::{AttendanceStore, LeaveStore, ScheduleStore};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    date(year, month, day).and_hms_opt(hour, minute, 0).unwrap()
}

pub fn shift(code: &str, start_hour: u32, end_hour: u32) -> ShiftDefinition {
    ShiftDefinition {
        code: code.to_string(),
        name: format!("Shift {code}"),
        start_time: NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(end_hour, 0, 0).unwrap(),
        crosses_midnight: false,
        duration_hours: (end_hour as f64) - (start_hour as f64),
    }
}

/// The canonical 20:00-06:00 night shift.
pub fn night_shift(code: &str) -> ShiftDefinition {
    ShiftDefinition {
        code: code.to_string(),
        name: "Malam".to_string(),
        start_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
        crosses_midnight: true,
        duration_hours: 10.0,
    }
}

pub fn locked_employee(nik: &str, default_shift_code: Option<&str>) -> Employee {
    Employee {
        id: 1,
        nik: nik.to_string(),
        full_name: "Budi Santoso".to_string(),
        branch_code: "JKT01".to_string(),
        department_code: "SECURITY".to_string(),
        default_shift_code: default_shift_code.map(str::to_string),
        schedule_is_locked: true,
        location_is_locked: true,
    }
}

pub fn unlocked_employee(nik: &str) -> Employee {
    Employee {
        schedule_is_locked: false,
        ..locked_employee(nik, None)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    shifts: HashMap<String, ShiftDefinition>,
    overrides: HashMap<(String, NaiveDate), String>,
    roster: HashMap<(String, NaiveDate), String>,
    recurring: HashMap<(String, String), String>,
    department: HashMap<(String, String, String), String>,
    leaves: Vec<LeaveRecord>,
    records: RefCell<Vec<AttendanceRecord>>,
    next_id: Cell<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shifts(shifts: Vec<ShiftDefinition>) -> Self {
        let mut store = Self::new();
        for s in shifts {
            store.add_shift(s);
        }
        store
    }

    pub fn add_shift(&mut self, shift: ShiftDefinition) {
        self.shifts.insert(shift.code.clone(), shift);
    }

    pub fn add_override(&mut self, nik: &str, date: NaiveDate, code: &str) {
        self.overrides
            .insert((nik.to_string(), date), code.to_string());
    }

    pub fn add_roster(&mut self, nik: &str, date: NaiveDate, code: &str) {
        self.roster.insert((nik.to_string(), date), code.to_string());
    }

    pub fn add_recurring(&mut self, nik: &str, weekday: &str, code: &str) {
        self.recurring
            .insert((nik.to_string(), weekday.to_string()), code.to_string());
    }

    pub fn add_department(&mut self, branch: &str, department: &str, weekday: &str, code: &str) {
        self.department.insert(
            (
                branch.to_string(),
                department.to_string(),
                weekday.to_string(),
            ),
            code.to_string(),
        );
    }

    pub fn add_leave(&mut self, nik: &str, start: NaiveDate, end: NaiveDate, leave_type: &str) {
        let id = self.bump_id();
        self.leaves.push(LeaveRecord {
            id,
            nik: nik.to_string(),
            start_date: start,
            end_date: end,
            leave_type: leave_type.to_string(),
            status: "approved".to_string(),
        });
    }

    pub fn seed_open_record(
        &mut self,
        nik: &str,
        date: NaiveDate,
        shift_code: Option<&str>,
        clock_in: NaiveDateTime,
        crosses_midnight: bool,
    ) {
        let id = self.bump_id();
        self.records.get_mut().push(AttendanceRecord {
            id,
            nik: nik.to_string(),
            date,
            shift_code: shift_code.map(str::to_string),
            status: "present".to_string(),
            clock_in: Some(clock_in),
            clock_out: None,
            crosses_midnight,
        });
    }

    /// Closes every open record at its own clock-in instant.
    pub fn close_all(&mut self) {
        for record in self.records.get_mut().iter_mut() {
            if record.clock_out.is_none() {
                record.clock_out = record.clock_in;
            }
        }
    }

    /// Closes every open record at `clock_out`.
    pub fn close_at(&mut self, clock_out: NaiveDateTime) {
        for record in self.records.get_mut().iter_mut() {
            if record.clock_out.is_none() {
                record.clock_out = Some(clock_out);
            }
        }
    }

    pub fn open_count(&self) -> usize {
        self.records.borrow().iter().filter(|r| r.is_open()).count()
    }

    fn bump_id(&self) -> u64 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

impl ScheduleStore for MemoryStore {
    async fn override_shift_code(
        &self,
        nik: &str,
        date: NaiveDate,
    ) -> Result<Option<String>, ScheduleError> {
        Ok(self.overrides.get(&(nik.to_string(), date)).cloned())
    }

    async fn roster_shift_code(
        &self,
        nik: &str,
        date: NaiveDate,
    ) -> Result<Option<String>, ScheduleError> {
        Ok(self.roster.get(&(nik.to_string(), date)).cloned())
    }

    async fn has_roster_in_month(
        &self,
        nik: &str,
        year: i32,
        month: u32,
    ) -> Result<bool, ScheduleError> {
        Ok(self.roster.keys().any(|(entry_nik, entry_date)| {
            entry_nik == nik && entry_date.year() == year && entry_date.month() == month
        }))
    }

    async fn recurring_shift_code(
        &self,
        nik: &str,
        weekday: &str,
    ) -> Result<Option<String>, ScheduleError> {
        Ok(self
            .recurring
            .get(&(nik.to_string(), weekday.to_string()))
            .cloned())
    }

    async fn has_recurring(&self, nik: &str) -> Result<bool, ScheduleError> {
        Ok(self.recurring.keys().any(|(entry_nik, _)| entry_nik == nik))
    }

    async fn department_shift_code(
        &self,
        branch: &str,
        department: &str,
        weekday: &str,
    ) -> Result<Option<String>, ScheduleError> {
        Ok(self
            .department
            .get(&(
                branch.to_string(),
                department.to_string(),
                weekday.to_string(),
            ))
            .cloned())
    }

    async fn department_has_schedule(
        &self,
        branch: &str,
        department: &str,
    ) -> Result<bool, ScheduleError> {
        Ok(self
            .department
            .keys()
            .any(|(b, d, _)| b == branch && d == department))
    }

    async fn shift_by_code(&self, code: &str) -> Result<Option<ShiftDefinition>, ScheduleError> {
        Ok(self.shifts.get(code).cloned())
    }
}

impl AttendanceStore for MemoryStore {
    async fn record_on(
        &self,
        nik: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, ScheduleError> {
        Ok(self
            .records
            .borrow()
            .iter()
            .find(|r| r.nik == nik && r.date == date)
            .cloned())
    }

    async fn open_record_on(
        &self,
        nik: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, ScheduleError> {
        Ok(self
            .records
            .borrow()
            .iter()
            .find(|r| r.nik == nik && r.date == date && r.is_open())
            .cloned())
    }

    async fn insert_clock_in(
        &self,
        new: &NewAttendance,
    ) -> Result<AttendanceRecord, ScheduleError> {
        let mut records = self.records.borrow_mut();
        if records
            .iter()
            .any(|r| r.nik == new.nik && r.date == new.date)
        {
            return Err(ScheduleError::DuplicateRecord);
        }
        let record = AttendanceRecord {
            id: self.bump_id(),
            nik: new.nik.clone(),
            date: new.date,
            shift_code: new.shift_code.clone(),
            status: new.status.to_string(),
            clock_in: Some(new.clock_in),
            clock_out: None,
            crosses_midnight: new.crosses_midnight,
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn close_record(&self, id: u64, clock_out: NaiveDateTime) -> Result<u64, ScheduleError> {
        let mut records = self.records.borrow_mut();
        match records.iter_mut().find(|r| r.id == id && r.is_open()) {
            Some(record) => {
                record.clock_out = Some(clock_out);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

impl LeaveStore for MemoryStore {
    async fn approved_leaves_overlapping(
        &self,
        nik: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<LeaveRecord>, ScheduleError> {
        Ok(self
            .leaves
            .iter()
            .filter(|l| l.nik == nik && l.start_date <= end && l.end_date >= start)
            .cloned()
            .collect())
    }
}
