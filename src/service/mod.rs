pub mod lifecycle;
mod reports;

use crate::clock::Clock;
use crate::config::Config;
use crate::error::AttendanceError;
use crate::model::attendance::{AttendanceRecord, CheckInReceipt, CheckOutReceipt, DayStatus};
use crate::model::employee::EmployeeProfile;
use crate::store::{AttendanceStore, EmployeeDirectory, LeaveLedger, StoreError};
use crate::utils::user_agent::classify_device;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Tunables for the attendance rules and read views.
#[derive(Debug, Clone)]
pub struct AttendanceSettings {
    pub overtime_threshold_hours: f64,
    pub annual_leave_allowance: i64,
    pub recent_activity_days: i64,
    pub recent_activity_limit: usize,
}

impl From<&Config> for AttendanceSettings {
    fn from(config: &Config) -> Self {
        Self {
            overtime_threshold_hours: config.overtime_threshold_hours,
            annual_leave_allowance: config.annual_leave_allowance,
            recent_activity_days: config.recent_activity_days,
            recent_activity_limit: config.recent_activity_limit,
        }
    }
}

/// Runs attendance operations for one caller at a time against the ports.
pub struct AttendanceService {
    records: Arc<dyn AttendanceStore>,
    employees: Arc<dyn EmployeeDirectory>,
    leaves: Arc<dyn LeaveLedger>,
    clock: Arc<dyn Clock>,
    settings: AttendanceSettings,
}

impl AttendanceService {
    pub fn new(
        records: Arc<dyn AttendanceStore>,
        employees: Arc<dyn EmployeeDirectory>,
        leaves: Arc<dyn LeaveLedger>,
        clock: Arc<dyn Clock>,
        settings: AttendanceSettings,
    ) -> Self {
        Self {
            records,
            employees,
            leaves,
            clock,
            settings,
        }
    }

    async fn resolve_employee(&self, employee_id: u64) -> Result<EmployeeProfile, AttendanceError> {
        self.employees
            .find(employee_id)
            .await?
            .ok_or(AttendanceError::EmployeeNotFound)
    }

    pub async fn check_in(&self, employee_id: u64, user_agent: &str) -> Result<CheckInReceipt, AttendanceError> {
        self.resolve_employee(employee_id).await?;

        let now = self.clock.now();
        let existing = self.records.find(employee_id, now.date()).await?;
        let is_new = existing.is_none();

        let (record, receipt) = lifecycle::check_in(existing, employee_id, classify_device(user_agent), now)?;

        if is_new {
            match self.records.insert(&record).await {
                Ok(()) => {}
                Err(StoreError::Duplicate) => {
                    // lost a race against a concurrent check-in for the same day
                    warn!(employee_id, date = %record.date, "Concurrent check-in detected");
                    return Err(self.already_checked_in(employee_id, &record).await);
                }
                Err(e) => return Err(e.into()),
            }
        } else {
            self.records.update(&record).await?;
        }

        info!(employee_id, device = %receipt.device, "Checked in");
        Ok(receipt)
    }

    async fn already_checked_in(
        &self,
        employee_id: u64,
        attempted: &AttendanceRecord,
    ) -> AttendanceError {
        match self.records.find(employee_id, attempted.date).await {
            Ok(Some(winner)) => AttendanceError::AlreadyCheckedIn {
                check_in: winner.check_in.unwrap_or(winner.created_at),
            },
            Ok(None) => AttendanceError::Store(StoreError::Duplicate),
            Err(e) => e.into(),
        }
    }

    pub async fn check_out(&self, employee_id: u64, user_agent: &str) -> Result<CheckOutReceipt, AttendanceError> {
        self.resolve_employee(employee_id).await?;

        let now = self.clock.now();
        let existing = self.records.find(employee_id, now.date()).await?;

        let (record, receipt) = lifecycle::check_out(
            existing,
            classify_device(user_agent),
            now,
            self.settings.overtime_threshold_hours,
        )?;
        self.records.update(&record).await?;

        info!(
            employee_id,
            work_hours = receipt.metrics.total_work_hours,
            overtime = receipt.metrics.is_overtime,
            "Checked out"
        );
        Ok(receipt)
    }

    pub async fn status(&self, employee_id: u64) -> Result<DayStatus, AttendanceError> {
        self.resolve_employee(employee_id).await?;

        let today = self.clock.now().date();
        let status = self.today_status(employee_id, today).await?;

        debug!(employee_id, state = ?status.state, "Attendance status");
        Ok(status)
    }

    async fn today_status(&self, employee_id: u64, today: NaiveDate) -> Result<DayStatus, AttendanceError> {
        let record = self.records.find(employee_id, today).await?;
        Ok(lifecycle::day_status(record.as_ref(), today))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::model::attendance::{AttendanceStatus, DayState, DeviceType};
    use crate::store::memory::InMemoryAttendanceStore;
    use async_trait::async_trait;

    const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";
    const WINDOWS: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

    #[actix_web::test]
    async fn check_in_then_status_reports_checked_in() {
        let h = harness("2026-03-02 09:00:00");

        let receipt = h.service.check_in(EMPLOYEE_ID, IPHONE).await.unwrap();
        assert_eq!(receipt.device, DeviceType::Mobile);

        let status = h.service.status(EMPLOYEE_ID).await.unwrap();
        assert_eq!(status.state, DayState::CheckedIn);
        assert_eq!(status.check_out, None);
    }

    #[actix_web::test]
    async fn second_check_in_returns_first_time_unchanged() {
        let h = harness("2026-03-02 09:00:00");
        h.service.check_in(EMPLOYEE_ID, WINDOWS).await.unwrap();

        h.clock.set(at("2026-03-02 09:45:00"));
        let err = h.service.check_in(EMPLOYEE_ID, WINDOWS).await.unwrap_err();

        assert!(matches!(err, AttendanceError::AlreadyCheckedIn { check_in } if check_in == at("2026-03-02 09:00:00")));
        let stored = h.store.find(EMPLOYEE_ID, at("2026-03-02 00:00:00").date()).await.unwrap().unwrap();
        assert_eq!(stored.check_in, Some(at("2026-03-02 09:00:00")));
    }

    #[actix_web::test]
    async fn check_in_fills_an_existing_row_without_check_in() {
        let date = at("2026-03-02 00:00:00").date();
        let store = InMemoryAttendanceStore::new();
        let mut absent = AttendanceRecord::open(EMPLOYEE_ID, date, at("2026-03-02 00:05:00"));
        absent.status = AttendanceStatus::Absent;
        store.insert(&absent).await.unwrap();
        let h = harness_with(store, Vec::new(), "2026-03-02 09:20:00");

        let receipt = h.service.check_in(EMPLOYEE_ID, IPHONE).await.unwrap();

        assert_eq!(receipt.check_in, at("2026-03-02 09:20:00"));
        assert_eq!(h.store.len().await, 1);
        let stored = h.store.find(EMPLOYEE_ID, date).await.unwrap().unwrap();
        assert_eq!(stored.check_in, Some(at("2026-03-02 09:20:00")));
        assert_eq!(stored.check_in_device, Some(DeviceType::Mobile));
        assert_eq!(stored.status, AttendanceStatus::Present);
        // same row, not a fresh insert
        assert_eq!(stored.created_at, at("2026-03-02 00:05:00"));
    }

    #[actix_web::test]
    async fn check_out_before_check_in_creates_nothing() {
        let h = harness("2026-03-02 17:00:00");

        let err = h.service.check_out(EMPLOYEE_ID, WINDOWS).await.unwrap_err();

        assert!(matches!(err, AttendanceError::NoRecordToday));
        assert!(h.store.is_empty().await);
    }

    #[actix_web::test]
    async fn check_out_computes_work_hours_and_overtime() {
        let h = harness("2026-03-02 09:00:00");
        h.service.check_in(EMPLOYEE_ID, WINDOWS).await.unwrap();

        h.clock.set(at("2026-03-02 17:30:00"));
        let receipt = h.service.check_out(EMPLOYEE_ID, IPHONE).await.unwrap();

        assert_eq!(receipt.metrics.total_work_hours, 8.5);
        assert!(receipt.metrics.is_overtime);
        assert_eq!(receipt.metrics.overtime_hours, 0.5);
        assert_eq!(receipt.device, DeviceType::Mobile);
    }

    #[actix_web::test]
    async fn second_check_out_does_not_recompute() {
        let h = harness("2026-03-02 09:00:00");
        h.service.check_in(EMPLOYEE_ID, WINDOWS).await.unwrap();
        h.clock.set(at("2026-03-02 16:00:00"));
        h.service.check_out(EMPLOYEE_ID, WINDOWS).await.unwrap();

        h.clock.set(at("2026-03-02 19:00:00"));
        let err = h.service.check_out(EMPLOYEE_ID, WINDOWS).await.unwrap_err();

        assert!(matches!(err, AttendanceError::AlreadyCheckedOut { check_out } if check_out == at("2026-03-02 16:00:00")));
        let status = h.service.status(EMPLOYEE_ID).await.unwrap();
        assert_eq!(status.metrics.total_work_hours, 7.0);
        assert!(!status.metrics.is_overtime);
    }

    #[actix_web::test]
    async fn a_new_day_starts_a_new_record() {
        let h = harness("2026-03-02 09:00:00");
        h.service.check_in(EMPLOYEE_ID, WINDOWS).await.unwrap();

        h.clock.set(at("2026-03-03 08:55:00"));
        assert_eq!(h.service.status(EMPLOYEE_ID).await.unwrap().state, DayState::NotCheckedIn);
        h.service.check_in(EMPLOYEE_ID, WINDOWS).await.unwrap();

        assert_eq!(h.store.len().await, 2);
    }

    #[actix_web::test]
    async fn unknown_employee_is_not_found() {
        let h = harness("2026-03-02 09:00:00");

        assert!(matches!(h.service.check_in(42, WINDOWS).await, Err(AttendanceError::EmployeeNotFound)));
        assert!(matches!(h.service.check_out(42, WINDOWS).await, Err(AttendanceError::EmployeeNotFound)));
        assert!(matches!(h.service.status(42).await, Err(AttendanceError::EmployeeNotFound)));
    }

    #[actix_web::test]
    async fn storage_failure_is_unexpected() {
        let h = harness_with(InMemoryAttendanceStore::offline(), Vec::new(), "2026-03-02 09:00:00");

        let err = h.service.check_in(EMPLOYEE_ID, WINDOWS).await.unwrap_err();

        assert!(err.is_unexpected());
    }

    /// Misses on `find` once, as if another request inserted in between.
    struct RacingStore {
        inner: InMemoryAttendanceStore,
        raced: futures::lock::Mutex<bool>,
    }

    #[async_trait]
    impl AttendanceStore for RacingStore {
        async fn find(&self, employee_id: u64, date: NaiveDate) -> Result<Option<AttendanceRecord>, StoreError> {
            let mut raced = self.raced.lock().await;
            if !*raced {
                *raced = true;
                return Ok(None);
            }
            self.inner.find(employee_id, date).await
        }

        async fn insert(&self, record: &AttendanceRecord) -> Result<(), StoreError> {
            self.inner.insert(record).await
        }

        async fn update(&self, record: &AttendanceRecord) -> Result<(), StoreError> {
            self.inner.update(record).await
        }

        async fn list_between(
            &self,
            employee_id: u64,
            from: NaiveDate,
            to: NaiveDate,
        ) -> Result<Vec<AttendanceRecord>, StoreError> {
            self.inner.list_between(employee_id, from, to).await
        }
    }

    #[actix_web::test]
    async fn losing_the_insert_race_reports_already_checked_in() {
        let inner = InMemoryAttendanceStore::new();
        let winner = lifecycle::check_in(None, EMPLOYEE_ID, DeviceType::Desktop, at("2026-03-02 08:59:59"))
            .unwrap()
            .0;
        inner.insert(&winner).await.unwrap();

        let store = Arc::new(RacingStore {
            inner,
            raced: futures::lock::Mutex::new(false),
        });
        let service = AttendanceService::new(
            store,
            Arc::new(crate::store::memory::InMemoryEmployeeDirectory::new([jane()])),
            Arc::new(crate::store::memory::InMemoryLeaveLedger::default()),
            Arc::new(crate::clock::ManualClock::new(at("2026-03-02 09:00:00"))),
            settings(),
        );

        let err = service.check_in(EMPLOYEE_ID, WINDOWS).await.unwrap_err();

        assert!(matches!(err, AttendanceError::AlreadyCheckedIn { check_in } if check_in == at("2026-03-02 08:59:59")));
    }
}
