use crate::model::attendance::{AttendanceRecord, AttendanceStatus, DeviceType};
use crate::model::employee::EmployeeProfile;
use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use crate::store::{AttendanceStore, EmployeeDirectory, LeaveLedger, StoreError};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::error::ErrorKind;
use sqlx::{FromRow, MySqlPool};
use std::str::FromStr;

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db_err) => from_db_error(db_err.kind(), e.to_string()),
            _ => StoreError::Backend(e.to_string()),
        }
    }
}

// Only the unique key (uq_attendance_employee_date) means "already there".
// FK, NOT NULL and CHECK failures share SQLSTATE 23000 but are backend errors.
fn from_db_error(kind: ErrorKind, message: String) -> StoreError {
    match kind {
        ErrorKind::UniqueViolation => StoreError::Duplicate,
        _ => StoreError::Backend(message),
    }
}

#[derive(FromRow)]
struct AttendanceRow {
    employee_id: u64,
    date: NaiveDate,
    check_in: Option<NaiveDateTime>,
    check_out: Option<NaiveDateTime>,
    check_in_device: Option<String>,
    check_out_device: Option<String>,
    status: String,
    total_work_hours: f64,
    is_overtime: bool,
    overtime_hours: f64,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

fn parse_device(value: Option<String>) -> Result<Option<DeviceType>, StoreError> {
    value
        .map(|v| DeviceType::from_str(&v).map_err(|_| StoreError::Corrupt(format!("device {v:?}"))))
        .transpose()
}

impl TryFrom<AttendanceRow> for AttendanceRecord {
    type Error = StoreError;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        let status = AttendanceStatus::from_str(&row.status)
            .map_err(|_| StoreError::Corrupt(format!("status {:?}", row.status)))?;

        Ok(AttendanceRecord {
            employee_id: row.employee_id,
            date: row.date,
            check_in: row.check_in,
            check_out: row.check_out,
            check_in_device: parse_device(row.check_in_device)?,
            check_out_device: parse_device(row.check_out_device)?,
            status,
            total_work_hours: row.total_work_hours,
            is_overtime: row.is_overtime,
            overtime_hours: row.overtime_hours,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_ATTENDANCE: &str = r#"
    SELECT employee_id, date, check_in, check_out, check_in_device, check_out_device,
           status, total_work_hours, is_overtime, overtime_hours, created_at, updated_at
    FROM attendance
"#;

/// `attendance` table access.
#[derive(Clone)]
pub struct MySqlAttendanceStore {
    pool: MySqlPool,
}

impl MySqlAttendanceStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceStore for MySqlAttendanceStore {
    async fn find(&self, employee_id: u64, date: NaiveDate) -> Result<Option<AttendanceRecord>, StoreError> {
        let sql = format!("{SELECT_ATTENDANCE} WHERE employee_id = ? AND date = ? LIMIT 1");

        let row = sqlx::query_as::<_, AttendanceRow>(&sql)
            .bind(employee_id)
            .bind(date)
            .fetch_optional(&self.pool)
            .await?;

        row.map(AttendanceRecord::try_from).transpose()
    }

    async fn insert(&self, record: &AttendanceRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO attendance
                (employee_id, date, check_in, check_out, check_in_device, check_out_device,
                 status, total_work_hours, is_overtime, overtime_hours, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.employee_id)
        .bind(record.date)
        .bind(record.check_in)
        .bind(record.check_out)
        .bind(record.check_in_device.map(|d| d.to_string()))
        .bind(record.check_out_device.map(|d| d.to_string()))
        .bind(record.status.to_string())
        .bind(record.total_work_hours)
        .bind(record.is_overtime)
        .bind(record.overtime_hours)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, record: &AttendanceRecord) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE attendance
            SET check_in = ?, check_out = ?, check_in_device = ?, check_out_device = ?,
                status = ?, total_work_hours = ?, is_overtime = ?, overtime_hours = ?,
                updated_at = ?
            WHERE employee_id = ?
            AND date = ?
            "#,
        )
        .bind(record.check_in)
        .bind(record.check_out)
        .bind(record.check_in_device.map(|d| d.to_string()))
        .bind(record.check_out_device.map(|d| d.to_string()))
        .bind(record.status.to_string())
        .bind(record.total_work_hours)
        .bind(record.is_overtime)
        .bind(record.overtime_hours)
        .bind(record.updated_at)
        .bind(record.employee_id)
        .bind(record.date)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Backend(format!(
                "no attendance row for employee {} on {}",
                record.employee_id, record.date
            )));
        }

        Ok(())
    }

    async fn list_between(
        &self,
        employee_id: u64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let sql = format!(
            "{SELECT_ATTENDANCE} WHERE employee_id = ? AND date BETWEEN ? AND ? ORDER BY date DESC"
        );

        let rows = sqlx::query_as::<_, AttendanceRow>(&sql)
            .bind(employee_id)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(AttendanceRecord::try_from).collect()
    }
}

/// Read-only view over the employee tables owned by the HR directory.
#[derive(Clone)]
pub struct MySqlEmployeeDirectory {
    pool: MySqlPool,
}

impl MySqlEmployeeDirectory {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeDirectory for MySqlEmployeeDirectory {
    async fn find(&self, employee_id: u64) -> Result<Option<EmployeeProfile>, StoreError> {
        let profile = sqlx::query_as::<_, EmployeeProfile>(
            r#"
            SELECT
                e.id,
                e.first_name,
                e.last_name,
                e.email,
                d.name AS department,
                j.title AS job_title
            FROM employees e
            LEFT JOIN departments d ON d.id = e.department_id
            LEFT JOIN job_titles j ON j.id = e.job_title_id
            WHERE e.id = ?
            "#,
        )
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }
}

/// Leave requests and day counts from the leave-management tables.
#[derive(Clone)]
pub struct MySqlLeaveLedger {
    pool: MySqlPool,
}

impl MySqlLeaveLedger {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeaveLedger for MySqlLeaveLedger {
    async fn days_between(
        &self,
        employee_id: u64,
        status: LeaveStatus,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<i64, StoreError> {
        // SUM yields DECIMAL in MySQL
        let days = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT CAST(COALESCE(SUM(DATEDIFF(LEAST(end_date, ?), GREATEST(start_date, ?)) + 1), 0) AS SIGNED)
            FROM leave_requests
            WHERE employee_id = ?
            AND status = ?
            AND start_date <= ?
            AND end_date >= ?
            "#,
        )
        .bind(to)
        .bind(from)
        .bind(employee_id)
        .bind(status.to_string())
        .bind(to)
        .bind(from)
        .fetch_one(&self.pool)
        .await?;

        Ok(days)
    }

    async fn requests_between(
        &self,
        employee_id: u64,
        status: LeaveStatus,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<LeaveRequest>, StoreError> {
        let rows = sqlx::query_as::<_, (u64, NaiveDate, NaiveDate)>(
            r#"
            SELECT employee_id, start_date, end_date
            FROM leave_requests
            WHERE employee_id = ?
            AND status = ?
            AND start_date <= ?
            AND end_date >= ?
            ORDER BY start_date
            "#,
        )
        .bind(employee_id)
        .bind(status.to_string())
        .bind(to)
        .bind(from)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(employee_id, start_date, end_date)| LeaveRequest {
                employee_id,
                start_date,
                end_date,
                status,
            })
            .collect())
    }
}
