// Read-only projections over attendance records, the employee directory
// and the leave ledger. Nothing here writes.

use super::AttendanceService;
use crate::error::AttendanceError;
use crate::model::attendance::{DayState, DayStatus, TIME_FORMAT};
use crate::model::employee::EmployeeProfile;
use crate::model::leave_request::LeaveStatus;
use crate::model::report::{
    Activity, ActivityKind, AttendanceSummary, Dashboard, DashboardAttendance, DashboardEmployee, LeaveBalance,
    TodayStatus,
};
use crate::utils::calendar::{days_before, month_bounds, working_days, working_days_between, year_bounds};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::collections::HashSet;
use tracing::debug;

const ACTIVITY_DATE_FORMAT: &str = "%d %b %Y";

impl From<&EmployeeProfile> for DashboardEmployee {
    fn from(employee: &EmployeeProfile) -> Self {
        Self {
            id: employee.id.to_string(),
            name: employee.full_name(),
            email: employee.email.clone(),
            role: employee.job_title.clone().unwrap_or_else(|| "Employee".to_string()),
            department: employee
                .department
                .clone()
                .unwrap_or_else(|| "Department".to_string()),
        }
    }
}

impl From<&DayStatus> for TodayStatus {
    fn from(status: &DayStatus) -> Self {
        Self {
            is_checked_in: status.state == DayState::CheckedIn,
            check_in_time: status.check_in.map(|t| t.format(TIME_FORMAT).to_string()),
            check_out_time: status.check_out.map(|t| t.format(TIME_FORMAT).to_string()),
        }
    }
}

impl AttendanceService {
    pub async fn attendance_summary(&self, employee_id: u64) -> Result<AttendanceSummary, AttendanceError> {
        self.resolve_employee(employee_id).await?;
        let today = self.clock.now().date();
        self.month_summary(employee_id, today).await
    }

    pub async fn leave_balance(&self, employee_id: u64) -> Result<LeaveBalance, AttendanceError> {
        self.resolve_employee(employee_id).await?;
        let today = self.clock.now().date();
        self.year_balance(employee_id, today).await
    }

    pub async fn recent_activities(&self, employee_id: u64) -> Result<Vec<Activity>, AttendanceError> {
        self.resolve_employee(employee_id).await?;

        let today = self.clock.now().date();
        let from = days_before(today, self.settings.recent_activity_days);
        let records = self.records.list_between(employee_id, from, today).await?;

        let mut events: Vec<(NaiveDateTime, Activity)> = Vec::with_capacity(records.len() * 2);
        for record in &records {
            let day = record.date.format(ACTIVITY_DATE_FORMAT).to_string();
            if let Some(t) = record.check_in {
                events.push((
                    t,
                    Activity {
                        title: format!("Checked in at {}", t.format("%H:%M")),
                        time: day.clone(),
                        kind: ActivityKind::Checkin,
                    },
                ));
            }
            if let Some(t) = record.check_out {
                events.push((
                    t,
                    Activity {
                        title: format!("Checked out at {}", t.format("%H:%M")),
                        time: day,
                        kind: ActivityKind::Checkout,
                    },
                ));
            }
        }

        // newest first
        events.sort_by(|a, b| b.0.cmp(&a.0));
        events.truncate(self.settings.recent_activity_limit);

        Ok(events.into_iter().map(|(_, activity)| activity).collect())
    }

    pub async fn dashboard(&self, employee_id: u64) -> Result<Dashboard, AttendanceError> {
        let employee = self.resolve_employee(employee_id).await?;
        let today = self.clock.now().date();

        let (summary, status, leaves) = futures::try_join!(
            self.month_summary(employee_id, today),
            self.today_status(employee_id, today),
            self.year_balance(employee_id, today),
        )?;

        Ok(Dashboard {
            employee: DashboardEmployee::from(&employee),
            attendance: DashboardAttendance {
                present_days: summary.present_days,
                absent_days: summary.absent_days,
                leave_days: summary.leave_days,
                today_status: TodayStatus::from(&status),
            },
            leaves,
        })
    }

    async fn month_summary(&self, employee_id: u64, today: NaiveDate) -> Result<AttendanceSummary, AttendanceError> {
        let (first, last) = month_bounds(today);
        let records = self.records.list_between(employee_id, first, last).await?;

        let present_days = records.iter().filter(|r| r.check_in.is_some()).count() as i64;
        let leave_days = self
            .leaves
            .days_between(employee_id, LeaveStatus::Approved, first, last)
            .await?;

        // Absence is never recorded; it is whatever working day before today
        // has neither a check-in nor approved leave.
        let absent_days = match today.pred_opt() {
            Some(yesterday) if yesterday >= first => {
                let attended: HashSet<NaiveDate> = records
                    .iter()
                    .filter(|r| r.check_in.is_some())
                    .map(|r| r.date)
                    .collect();
                let on_leave = self
                    .leaves
                    .requests_between(employee_id, LeaveStatus::Approved, first, yesterday)
                    .await?;
                working_days(first, yesterday)
                    .filter(|d| !attended.contains(d))
                    .filter(|d| !on_leave.iter().any(|leave| leave.covers(*d)))
                    .count() as i64
            }
            _ => 0,
        };

        debug!(employee_id, present_days, absent_days, leave_days, "Monthly summary");

        Ok(AttendanceSummary {
            present_days,
            absent_days,
            leave_days,
            working_days: working_days_between(first, last),
            month: today.month(),
            year: today.year(),
        })
    }

    async fn year_balance(&self, employee_id: u64, today: NaiveDate) -> Result<LeaveBalance, AttendanceError> {
        let (first, last) = year_bounds(today);

        let used_leaves = self
            .leaves
            .days_between(employee_id, LeaveStatus::Approved, first, last)
            .await?;
        let pending_leaves = self
            .leaves
            .days_between(employee_id, LeaveStatus::Pending, first, last)
            .await?;
        let total_leaves = self.settings.annual_leave_allowance;

        Ok(LeaveBalance {
            total_leaves,
            used_leaves,
            available_leaves: (total_leaves - used_leaves).max(0),
            pending_leaves,
            year: today.year(),
        })
    }
}
