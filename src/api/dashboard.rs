use crate::api::attendance::log_unexpected;
use crate::auth::auth::AuthUser;
use crate::error::AttendanceError;
use crate::model::report::{Activity, AttendanceSummary, Dashboard, LeaveBalance};
use crate::service::AttendanceService;
use actix_web::{HttpResponse, web};

/// Attendance counts for the current month
#[utoipa::path(
    get,
    path = "/api/employee/attendance-summary",
    responses(
        (status = 200, description = "Monthly attendance summary", body = AttendanceSummary),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn attendance_summary(
    auth: AuthUser,
    service: web::Data<AttendanceService>,
) -> Result<HttpResponse, AttendanceError> {
    let employee_id = auth.employee_id()?;

    let summary = service
        .attendance_summary(employee_id)
        .await
        .inspect_err(|e| log_unexpected(e, employee_id, "Attendance summary"))?;

    Ok(HttpResponse::Ok().json(summary))
}

/// Leave allowance and usage for the current year
#[utoipa::path(
    get,
    path = "/api/employee/leave-balance",
    responses(
        (status = 200, description = "Leave balance", body = LeaveBalance),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn leave_balance(
    auth: AuthUser,
    service: web::Data<AttendanceService>,
) -> Result<HttpResponse, AttendanceError> {
    let employee_id = auth.employee_id()?;

    let balance = service
        .leave_balance(employee_id)
        .await
        .inspect_err(|e| log_unexpected(e, employee_id, "Leave balance"))?;

    Ok(HttpResponse::Ok().json(balance))
}

/// Latest check-ins and check-outs
#[utoipa::path(
    get,
    path = "/api/employee/recent-activities",
    responses(
        (status = 200, description = "Newest activities first", body = [Activity]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn recent_activities(
    auth: AuthUser,
    service: web::Data<AttendanceService>,
) -> Result<HttpResponse, AttendanceError> {
    let employee_id = auth.employee_id()?;

    let activities = service
        .recent_activities(employee_id)
        .await
        .inspect_err(|e| log_unexpected(e, employee_id, "Recent activities"))?;

    Ok(HttpResponse::Ok().json(activities))
}

/// All dashboard data in one call
#[utoipa::path(
    get,
    path = "/api/employee/dashboard",
    responses(
        (status = 200, description = "Dashboard data", body = Dashboard),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn dashboard(
    auth: AuthUser,
    service: web::Data<AttendanceService>,
) -> Result<HttpResponse, AttendanceError> {
    let employee_id = auth.employee_id()?;

    let data = service
        .dashboard(employee_id)
        .await
        .inspect_err(|e| log_unexpected(e, employee_id, "Dashboard"))?;

    Ok(HttpResponse::Ok().json(data))
}
