use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

pub const TIME_FORMAT: &str = "%H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Coarse client category taken from the `User-Agent` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    Tablet,
    Desktop,
    Unknown,
}

/// Lifecycle stage stored on the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Completed,
}

/// One employee, one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    pub employee_id: u64,
    pub date: NaiveDate,
    pub check_in: Option<NaiveDateTime>,
    pub check_out: Option<NaiveDateTime>,
    pub check_in_device: Option<DeviceType>,
    pub check_out_device: Option<DeviceType>,
    pub status: AttendanceStatus,
    pub total_work_hours: f64,
    pub is_overtime: bool,
    pub overtime_hours: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl AttendanceRecord {
    /// Fresh record for `date` with nothing set yet.
    pub fn open(employee_id: u64, date: NaiveDate, now: NaiveDateTime) -> Self {
        Self {
            employee_id,
            date,
            check_in: None,
            check_out: None,
            check_in_device: None,
            check_out_device: None,
            status: AttendanceStatus::Present,
            total_work_hours: 0.0,
            is_overtime: false,
            overtime_hours: 0.0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Hours worked and the overtime split, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorkMetrics {
    pub total_work_hours: f64,
    pub is_overtime: bool,
    pub overtime_hours: f64,
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl WorkMetrics {
    pub fn measure(check_in: NaiveDateTime, check_out: NaiveDateTime, threshold_hours: f64) -> Self {
        // same-day records only; clock skew must not produce negative hours
        let seconds = (check_out - check_in).num_seconds().max(0);
        let total_work_hours = round2(seconds as f64 / 3600.0);

        if total_work_hours > threshold_hours {
            Self {
                total_work_hours,
                is_overtime: true,
                overtime_hours: round2(total_work_hours - threshold_hours),
            }
        } else {
            Self {
                total_work_hours,
                is_overtime: false,
                overtime_hours: 0.0,
            }
        }
    }
}

/// Result of a successful check-in.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckInReceipt {
    pub date: NaiveDate,
    pub check_in: NaiveDateTime,
    pub device: DeviceType,
}

/// Result of a successful check-out.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutReceipt {
    pub date: NaiveDate,
    pub check_in: NaiveDateTime,
    pub check_out: NaiveDateTime,
    pub device: DeviceType,
    pub metrics: WorkMetrics,
}

/// What the status endpoint reports for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DayState {
    NotCheckedIn,
    CheckedIn,
    Completed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayStatus {
    pub state: DayState,
    pub date: NaiveDate,
    /// False when no record exists at all for the day.
    pub has_record: bool,
    pub check_in: Option<NaiveDateTime>,
    pub check_out: Option<NaiveDateTime>,
    pub metrics: WorkMetrics,
}
