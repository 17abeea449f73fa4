use crate::api::attendance::{AttendanceStatusResponse, CheckInResponse, CheckOutResponse};
use crate::model::attendance::{DayState, DeviceType};
use crate::model::report::{
    Activity, ActivityKind, AttendanceSummary, Dashboard, DashboardAttendance, DashboardEmployee, LeaveBalance,
    TodayStatus,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance API",
        version = "1.0.0",
        description = r#"
## Employee Attendance

Self-service attendance endpoints for the employee portal.

### 🔹 Key Features
- **Daily check-in / check-out** with device detection
- **Work hours and overtime** computed at check-out
- **Dashboard views**: monthly summary, leave balance, recent activity

### 🔐 Security
Every endpoint requires a **JWT Bearer** access token linked to an employee.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::check_in,
        crate::api::attendance::check_out,
        crate::api::attendance::attendance_status,

        crate::api::dashboard::attendance_summary,
        crate::api::dashboard::leave_balance,
        crate::api::dashboard::recent_activities,
        crate::api::dashboard::dashboard
    ),
    components(
        schemas(
            CheckInResponse,
            CheckOutResponse,
            AttendanceStatusResponse,
            DayState,
            DeviceType,
            AttendanceSummary,
            LeaveBalance,
            Activity,
            ActivityKind,
            Dashboard,
            DashboardEmployee,
            DashboardAttendance,
            TodayStatus
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Attendance", description = "Check-in, check-out and daily status"),
        (name = "Dashboard", description = "Read-only employee dashboard views"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
