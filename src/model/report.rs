use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "presentDays": 12,
    "absentDays": 1,
    "leaveDays": 2,
    "workingDays": 22,
    "month": 3,
    "year": 2026
}))]
pub struct AttendanceSummary {
    pub present_days: i64,
    pub absent_days: i64,
    pub leave_days: i64,
    pub working_days: i64,
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "totalLeaves": 24,
    "usedLeaves": 3,
    "availableLeaves": 21,
    "pendingLeaves": 1,
    "year": 2026
}))]
pub struct LeaveBalance {
    pub total_leaves: i64,
    pub used_leaves: i64,
    pub available_leaves: i64,
    pub pending_leaves: i64,
    pub year: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Checkin,
    Checkout,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Activity {
    #[schema(example = "Checked in at 09:02")]
    pub title: String,
    #[schema(example = "02 Mar 2026")]
    pub time: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardEmployee {
    #[schema(example = "1000")]
    pub id: String,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "john.doe@company.com")]
    pub email: String,
    #[schema(example = "Software Engineer")]
    pub role: String,
    #[schema(example = "Engineering")]
    pub department: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodayStatus {
    pub is_checked_in: bool,
    #[schema(example = "09:02:11", nullable = true)]
    pub check_in_time: Option<String>,
    #[schema(example = json!(null), nullable = true)]
    pub check_out_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardAttendance {
    pub present_days: i64,
    pub absent_days: i64,
    pub leave_days: i64,
    pub today_status: TodayStatus,
}

/// Everything the employee dashboard renders, in one body.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Dashboard {
    pub employee: DashboardEmployee,
    pub attendance: DashboardAttendance,
    pub leaves: LeaveBalance,
}
