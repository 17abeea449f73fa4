// In memory ports backing the service and HTTP tests.

use crate::model::attendance::AttendanceRecord;
use crate::model::employee::EmployeeProfile;
use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use crate::store::{AttendanceStore, EmployeeDirectory, LeaveLedger, StoreError};
use async_trait::async_trait;
use chrono::NaiveDate;
use futures::lock::Mutex;
use std::collections::HashMap;

#[derive(Default)]
pub struct InMemoryAttendanceStore {
    rows: Mutex<HashMap<(u64, NaiveDate), AttendanceRecord>>,
    offline: bool,
}

impl InMemoryAttendanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with a backend error.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline {
            return Err(StoreError::Backend("attendance store offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl AttendanceStore for InMemoryAttendanceStore {
    async fn find(&self, employee_id: u64, date: NaiveDate) -> Result<Option<AttendanceRecord>, StoreError> {
        self.check_online()?;
        Ok(self.rows.lock().await.get(&(employee_id, date)).cloned())
    }

    async fn insert(&self, record: &AttendanceRecord) -> Result<(), StoreError> {
        self.check_online()?;
        let mut rows = self.rows.lock().await;
        let key = (record.employee_id, record.date);
        if rows.contains_key(&key) {
            return Err(StoreError::Duplicate);
        }
        rows.insert(key, record.clone());
        Ok(())
    }

    async fn update(&self, record: &AttendanceRecord) -> Result<(), StoreError> {
        self.check_online()?;
        let mut rows = self.rows.lock().await;
        match rows.get_mut(&(record.employee_id, record.date)) {
            Some(row) => {
                *row = record.clone();
                Ok(())
            }
            None => Err(StoreError::Backend(format!(
                "no attendance row for employee {} on {}",
                record.employee_id, record.date
            ))),
        }
    }

    async fn list_between(
        &self,
        employee_id: u64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        self.check_online()?;
        let rows = self.rows.lock().await;
        let mut items: Vec<AttendanceRecord> = rows
            .values()
            .filter(|r| r.employee_id == employee_id && r.date >= from && r.date <= to)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(items)
    }
}

#[derive(Default)]
pub struct InMemoryEmployeeDirectory {
    employees: HashMap<u64, EmployeeProfile>,
}

impl InMemoryEmployeeDirectory {
    pub fn new(employees: impl IntoIterator<Item = EmployeeProfile>) -> Self {
        Self {
            employees: employees.into_iter().map(|e| (e.id, e)).collect(),
        }
    }
}

#[async_trait]
impl EmployeeDirectory for InMemoryEmployeeDirectory {
    async fn find(&self, employee_id: u64) -> Result<Option<EmployeeProfile>, StoreError> {
        Ok(self.employees.get(&employee_id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryLeaveLedger {
    requests: Vec<LeaveRequest>,
}

impl InMemoryLeaveLedger {
    pub fn new(requests: Vec<LeaveRequest>) -> Self {
        Self { requests }
    }
}

#[async_trait]
impl LeaveLedger for InMemoryLeaveLedger {
    async fn days_between(
        &self,
        employee_id: u64,
        status: LeaveStatus,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<i64, StoreError> {
        Ok(self
            .requests
            .iter()
            .filter(|r| r.employee_id == employee_id && r.status == status)
            .map(|r| r.days_within(from, to))
            .sum())
    }

    async fn requests_between(
        &self,
        employee_id: u64,
        status: LeaveStatus,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<LeaveRequest>, StoreError> {
        Ok(self
            .requests
            .iter()
            .filter(|r| r.employee_id == employee_id && r.status == status)
            .filter(|r| r.start_date <= to && r.end_date >= from)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn record(employee_id: u64, date: &str) -> AttendanceRecord {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        let now = NaiveDateTime::new(date, chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        AttendanceRecord::open(employee_id, date, now)
    }

    #[actix_web::test]
    async fn rejects_a_second_row_for_the_same_day() {
        let store = InMemoryAttendanceStore::new();
        store.insert(&record(1, "2026-03-02")).await.unwrap();

        let result = store.insert(&record(1, "2026-03-02")).await;

        assert!(matches!(result, Err(StoreError::Duplicate)));
        assert_eq!(store.len().await, 1);
    }

    #[actix_web::test]
    async fn lists_newest_first_within_range() {
        let store = InMemoryAttendanceStore::new();
        for day in ["2026-03-02", "2026-03-04", "2026-03-03", "2026-03-09"] {
            store.insert(&record(1, day)).await.unwrap();
        }
        store.insert(&record(2, "2026-03-03")).await.unwrap();

        let from = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        let dates: Vec<_> = store
            .list_between(1, from, to)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.date.to_string())
            .collect();

        assert_eq!(dates, vec!["2026-03-04", "2026-03-03", "2026-03-02"]);
    }

    #[actix_web::test]
    async fn update_requires_an_existing_row() {
        let store = InMemoryAttendanceStore::new();
        let result = store.update(&record(1, "2026-03-02")).await;
        assert!(matches!(result, Err(StoreError::Backend(_))));
    }

    #[actix_web::test]
    async fn leave_ledger_returns_overlapping_requests_only() {
        let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        let leave = |employee_id, start: &str, end: &str, status| LeaveRequest {
            employee_id,
            start_date: d(start),
            end_date: d(end),
            status,
        };
        let ledger = InMemoryLeaveLedger::new(vec![
            leave(1, "2026-02-26", "2026-03-03", LeaveStatus::Approved),
            leave(1, "2026-03-20", "2026-03-20", LeaveStatus::Pending),
            leave(1, "2026-04-01", "2026-04-02", LeaveStatus::Approved),
            leave(2, "2026-03-05", "2026-03-05", LeaveStatus::Approved),
        ]);

        let found = ledger
            .requests_between(1, LeaveStatus::Approved, d("2026-03-01"), d("2026-03-31"))
            .await
            .unwrap();

        assert_eq!(found, vec![leave(1, "2026-02-26", "2026-03-03", LeaveStatus::Approved)]);
        assert_eq!(
            ledger
                .days_between(1, LeaveStatus::Approved, d("2026-03-01"), d("2026-03-31"))
                .await
                .unwrap(),
            3
        );
    }

    #[actix_web::test]
    async fn offline_store_fails_every_call() {
        let store = InMemoryAttendanceStore::offline();
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let err = store.find(1, date).await.unwrap_err();
        assert!(err.to_string().contains("attendance store offline"));
    }
}
