use crate::auth::auth::AuthUser;
use crate::error::AttendanceError;
use crate::model::attendance::{
    CheckInReceipt, CheckOutReceipt, DATE_FORMAT, DayState, DayStatus, DeviceType, TIME_FORMAT,
};
use crate::service::AttendanceService;
use actix_web::{HttpRequest, HttpResponse, http::header, web};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "message": "Check-in successful",
    "check_in_time": "09:02:11",
    "device": "desktop",
    "date": "2026-03-02"
}))]
pub struct CheckInResponse {
    pub message: String,
    pub check_in_time: String,
    pub device: DeviceType,
    pub date: String,
}

impl From<CheckInReceipt> for CheckInResponse {
    fn from(receipt: CheckInReceipt) -> Self {
        Self {
            message: "Check-in successful".to_string(),
            check_in_time: receipt.check_in.format(TIME_FORMAT).to_string(),
            device: receipt.device,
            date: receipt.date.format(DATE_FORMAT).to_string(),
        }
    }
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "message": "Check-out successful",
    "check_in_time": "09:00:00",
    "check_out_time": "17:30:00",
    "work_hours": 8.5,
    "overtime_hours": 0.5,
    "is_overtime": true,
    "device": "mobile",
    "date": "2026-03-02"
}))]
pub struct CheckOutResponse {
    pub message: String,
    pub check_in_time: String,
    pub check_out_time: String,
    pub work_hours: f64,
    pub overtime_hours: f64,
    pub is_overtime: bool,
    pub device: DeviceType,
    pub date: String,
}

impl From<CheckOutReceipt> for CheckOutResponse {
    fn from(receipt: CheckOutReceipt) -> Self {
        Self {
            message: "Check-out successful".to_string(),
            check_in_time: receipt.check_in.format(TIME_FORMAT).to_string(),
            check_out_time: receipt.check_out.format(TIME_FORMAT).to_string(),
            work_hours: receipt.metrics.total_work_hours,
            overtime_hours: receipt.metrics.overtime_hours,
            is_overtime: receipt.metrics.is_overtime,
            device: receipt.device,
            date: receipt.date.format(DATE_FORMAT).to_string(),
        }
    }
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "status": "checked_in",
    "date": "2026-03-02",
    "check_in_time": "09:02:11",
    "check_out_time": null,
    "work_hours": 0.0,
    "overtime_hours": 0.0,
    "is_overtime": false
}))]
pub struct AttendanceStatusResponse {
    pub status: DayState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub date: String,
    #[schema(nullable = true)]
    pub check_in_time: Option<String>,
    #[schema(nullable = true)]
    pub check_out_time: Option<String>,
    pub work_hours: f64,
    pub overtime_hours: f64,
    pub is_overtime: bool,
}

impl From<DayStatus> for AttendanceStatusResponse {
    fn from(status: DayStatus) -> Self {
        Self {
            status: status.state,
            message: (!status.has_record).then(|| "No attendance record for today".to_string()),
            date: status.date.format(DATE_FORMAT).to_string(),
            check_in_time: status.check_in.map(|t| t.format(TIME_FORMAT).to_string()),
            check_out_time: status.check_out.map(|t| t.format(TIME_FORMAT).to_string()),
            work_hours: status.metrics.total_work_hours,
            overtime_hours: status.metrics.overtime_hours,
            is_overtime: status.metrics.is_overtime,
        }
    }
}

pub(crate) fn user_agent(req: &HttpRequest) -> &str {
    req.headers()
        .get(header::USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("")
}

/// Log failures the caller can do nothing about.
pub(crate) fn log_unexpected(err: &AttendanceError, employee_id: u64, what: &'static str) {
    if err.is_unexpected() {
        error!(error = %err, employee_id, "{what} failed");
    }
}

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/api/employee/checkin",
    params(
        ("User-Agent" = Option<String>, Header, description = "Client identifier used for device classification")
    ),
    responses(
        (status = 200, description = "Checked in successfully", body = CheckInResponse),
        (status = 400, description = "Already checked in today", body = Object, example = json!({
            "error": "Already checked in today",
            "check_in_time": "09:02:11"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "Employee not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn check_in(
    auth: AuthUser,
    req: HttpRequest,
    service: web::Data<AttendanceService>,
) -> Result<HttpResponse, AttendanceError> {
    let employee_id = auth.employee_id()?;

    let receipt = service
        .check_in(employee_id, user_agent(&req))
        .await
        .inspect_err(|e| log_unexpected(e, employee_id, "Check-in"))?;

    Ok(HttpResponse::Ok().json(CheckInResponse::from(receipt)))
}

/// Check-out endpoint
#[utoipa::path(
    post,
    path = "/api/employee/checkout",
    params(
        ("User-Agent" = Option<String>, Header, description = "Client identifier used for device classification")
    ),
    responses(
        (status = 200, description = "Checked out successfully", body = CheckOutResponse),
        (status = 400, description = "No record today, not checked in, or already checked out", body = Object, example = json!({
            "error": "Already checked out today",
            "check_out_time": "17:30:00"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn check_out(
    auth: AuthUser,
    req: HttpRequest,
    service: web::Data<AttendanceService>,
) -> Result<HttpResponse, AttendanceError> {
    let employee_id = auth.employee_id()?;

    let receipt = service
        .check_out(employee_id, user_agent(&req))
        .await
        .inspect_err(|e| log_unexpected(e, employee_id, "Check-out"))?;

    Ok(HttpResponse::Ok().json(CheckOutResponse::from(receipt)))
}

/// Today's attendance status
#[utoipa::path(
    get,
    path = "/api/employee/attendance-status",
    responses(
        (status = 200, description = "Today's attendance status", body = AttendanceStatusResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn attendance_status(
    auth: AuthUser,
    service: web::Data<AttendanceService>,
) -> Result<HttpResponse, AttendanceError> {
    let employee_id = auth.employee_id()?;

    let status = service
        .status(employee_id)
        .await
        .inspect_err(|e| log_unexpected(e, employee_id, "Attendance status"))?;

    Ok(HttpResponse::Ok().json(AttendanceStatusResponse::from(status)))
}
