//! Daily attendance state machine.
//!
//! Pure decisions over value-type records: no storage, no clock. The caller
//! loads today's record, asks one of these functions what the next record is,
//! and persists the result.

use crate::error::AttendanceError;
use crate::model::attendance::{
    AttendanceRecord, AttendanceStatus, CheckInReceipt, CheckOutReceipt, DayState, DayStatus, DeviceType,
    WorkMetrics,
};
use chrono::{NaiveDate, NaiveDateTime};

pub fn check_in(
    existing: Option<AttendanceRecord>,
    employee_id: u64,
    device: DeviceType,
    now: NaiveDateTime,
) -> Result<(AttendanceRecord, CheckInReceipt), AttendanceError> {
    let mut record = match existing {
        Some(record) => {
            if let Some(check_in) = record.check_in {
                return Err(AttendanceError::AlreadyCheckedIn { check_in });
            }
            record
        }
        None => AttendanceRecord::open(employee_id, now.date(), now),
    };

    record.check_in = Some(now);
    record.check_in_device = Some(device);
    record.status = AttendanceStatus::Present;
    record.updated_at = now;

    let receipt = CheckInReceipt {
        date: record.date,
        check_in: now,
        device,
    };
    Ok((record, receipt))
}

pub fn check_out(
    existing: Option<AttendanceRecord>,
    device: DeviceType,
    now: NaiveDateTime,
    overtime_threshold_hours: f64,
) -> Result<(AttendanceRecord, CheckOutReceipt), AttendanceError> {
    let mut record = existing.ok_or(AttendanceError::NoRecordToday)?;
    let check_in = record.check_in.ok_or(AttendanceError::NotCheckedIn)?;
    if let Some(check_out) = record.check_out {
        return Err(AttendanceError::AlreadyCheckedOut { check_out });
    }

    let metrics = WorkMetrics::measure(check_in, now, overtime_threshold_hours);

    record.check_out = Some(now);
    record.check_out_device = Some(device);
    record.total_work_hours = metrics.total_work_hours;
    record.is_overtime = metrics.is_overtime;
    record.overtime_hours = metrics.overtime_hours;
    record.status = AttendanceStatus::Completed;
    record.updated_at = now;

    let receipt = CheckOutReceipt {
        date: record.date,
        check_in,
        check_out: now,
        device,
        metrics,
    };
    Ok((record, receipt))
}

pub fn day_status(record: Option<&AttendanceRecord>, today: NaiveDate) -> DayStatus {
    let Some(record) = record else {
        return DayStatus {
            state: DayState::NotCheckedIn,
            date: today,
            has_record: false,
            check_in: None,
            check_out: None,
            metrics: WorkMetrics::default(),
        };
    };

    let state = match (record.check_in, record.check_out) {
        (Some(_), None) => DayState::CheckedIn,
        (Some(_), Some(_)) => DayState::Completed,
        // check-out without check-in cannot be produced by this service
        _ => DayState::NotCheckedIn,
    };

    DayStatus {
        state,
        date: today,
        has_record: true,
        check_in: record.check_in,
        check_out: record.check_out,
        metrics: WorkMetrics {
            total_work_hours: record.total_work_hours,
            is_overtime: record.is_overtime,
            overtime_hours: record.overtime_hours,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn at(hms: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("2026-03-02 {hms}"), "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[fixture]
    fn checked_in() -> AttendanceRecord {
        let (record, _) = check_in(None, 7, DeviceType::Desktop, at("09:00:00")).unwrap();
        record
    }

    #[test]
    fn first_check_in_opens_a_present_record() {
        let (record, receipt) = check_in(None, 7, DeviceType::Mobile, at("09:00:00")).unwrap();

        assert_eq!(record.employee_id, 7);
        assert_eq!(record.date, at("00:00:00").date());
        assert_eq!(record.check_in, Some(at("09:00:00")));
        assert_eq!(record.check_in_device, Some(DeviceType::Mobile));
        assert_eq!(record.status, AttendanceStatus::Present);
        assert_eq!(record.check_out, None);
        assert_eq!(receipt.device, DeviceType::Mobile);
        assert_eq!(receipt.check_in, at("09:00:00"));
    }

    #[rstest]
    fn second_check_in_reports_the_first_time(checked_in: AttendanceRecord) {
        let err = check_in(Some(checked_in), 7, DeviceType::Mobile, at("10:00:00")).unwrap_err();

        assert!(matches!(err, AttendanceError::AlreadyCheckedIn { check_in } if check_in == at("09:00:00")));
    }

    #[test]
    fn check_in_reuses_a_record_without_check_in() {
        let mut existing = AttendanceRecord::open(7, at("00:00:00").date(), at("06:00:00"));
        existing.status = AttendanceStatus::Absent;

        let (record, _) = check_in(Some(existing), 7, DeviceType::Tablet, at("09:30:00")).unwrap();

        assert_eq!(record.created_at, at("06:00:00"));
        assert_eq!(record.updated_at, at("09:30:00"));
        assert_eq!(record.status, AttendanceStatus::Present);
    }

    #[test]
    fn check_out_without_record_is_rejected() {
        let err = check_out(None, DeviceType::Desktop, at("17:00:00"), 8.0).unwrap_err();
        assert!(matches!(err, AttendanceError::NoRecordToday));
    }

    #[test]
    fn check_out_without_check_in_is_rejected() {
        let existing = AttendanceRecord::open(7, at("00:00:00").date(), at("06:00:00"));
        let err = check_out(Some(existing), DeviceType::Desktop, at("17:00:00"), 8.0).unwrap_err();
        assert!(matches!(err, AttendanceError::NotCheckedIn));
    }

    #[rstest]
    fn check_out_completes_the_day(checked_in: AttendanceRecord) {
        let (record, receipt) = check_out(Some(checked_in), DeviceType::Mobile, at("17:30:00"), 8.0).unwrap();

        assert_eq!(record.status, AttendanceStatus::Completed);
        assert_eq!(record.check_out, Some(at("17:30:00")));
        assert_eq!(record.check_out_device, Some(DeviceType::Mobile));
        assert_eq!(record.check_in_device, Some(DeviceType::Desktop));
        assert_eq!(record.total_work_hours, 8.5);
        assert!(record.is_overtime);
        assert_eq!(record.overtime_hours, 0.5);
        assert_eq!(receipt.metrics, WorkMetrics::measure(at("09:00:00"), at("17:30:00"), 8.0));
    }

    #[rstest]
    fn second_check_out_keeps_the_first(checked_in: AttendanceRecord) {
        let (done, _) = check_out(Some(checked_in), DeviceType::Desktop, at("16:00:00"), 8.0).unwrap();

        let err = check_out(Some(done), DeviceType::Desktop, at("18:00:00"), 8.0).unwrap_err();

        assert!(matches!(err, AttendanceError::AlreadyCheckedOut { check_out } if check_out == at("16:00:00")));
    }

    #[test]
    fn status_without_record_is_not_checked_in() {
        let today = at("00:00:00").date();
        let status = day_status(None, today);

        assert_eq!(status.state, DayState::NotCheckedIn);
        assert!(!status.has_record);
        assert_eq!(status.metrics, WorkMetrics::default());
    }

    #[rstest]
    fn status_follows_the_lifecycle(checked_in: AttendanceRecord) {
        let today = checked_in.date;
        assert_eq!(day_status(Some(&checked_in), today).state, DayState::CheckedIn);

        let (done, _) = check_out(Some(checked_in), DeviceType::Desktop, at("16:00:00"), 8.0).unwrap();
        let status = day_status(Some(&done), today);

        assert_eq!(status.state, DayState::Completed);
        assert_eq!(status.metrics.total_work_hours, 7.0);
        assert!(!status.metrics.is_overtime);
    }

    #[test]
    fn status_of_check_out_without_check_in_is_not_checked_in() {
        let mut odd = AttendanceRecord::open(7, at("00:00:00").date(), at("06:00:00"));
        odd.check_out = Some(at("17:00:00"));

        assert_eq!(day_status(Some(&odd), odd.date).state, DayState::NotCheckedIn);
    }
}
