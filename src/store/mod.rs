//! Persistence ports. The service only talks to storage through these traits.

#[cfg(test)]
pub mod memory;
pub mod mysql;

use crate::model::attendance::AttendanceRecord;
use crate::model::employee::EmployeeProfile;
use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A record for the same (employee, date) already exists.
    #[error("duplicate attendance record")]
    Duplicate,

    #[error("corrupt row: {0}")]
    Corrupt(String),

    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    async fn find(&self, employee_id: u64, date: NaiveDate) -> Result<Option<AttendanceRecord>, StoreError>;
    async fn insert(&self, record: &AttendanceRecord) -> Result<(), StoreError>;
    async fn update(&self, record: &AttendanceRecord) -> Result<(), StoreError>;
    /// Records dated `from..=to`, newest date first.
    async fn list_between(
        &self,
        employee_id: u64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, StoreError>;
}

#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    async fn find(&self, employee_id: u64) -> Result<Option<EmployeeProfile>, StoreError>;
}

#[async_trait]
pub trait LeaveLedger: Send + Sync {
    /// Leave days with `status` that fall inside `from..=to`.
    async fn days_between(
        &self,
        employee_id: u64,
        status: LeaveStatus,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<i64, StoreError>;

    /// Requests with `status` overlapping `from..=to`, unclipped.
    async fn requests_between(
        &self,
        employee_id: u64,
        status: LeaveStatus,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<LeaveRequest>, StoreError>;
}
