use crate::model::attendance::TIME_FORMAT;
use crate::store::StoreError;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::NaiveDateTime;
use serde_json::json;
use thiserror::Error;

/// Every way an attendance operation can fail.
#[derive(Debug, Error)]
pub enum AttendanceError {
    #[error("Employee not found")]
    EmployeeNotFound,

    #[error("Already checked in today")]
    AlreadyCheckedIn { check_in: NaiveDateTime },

    #[error("No attendance record found for today. Please check-in first.")]
    NoRecordToday,

    #[error("Check-in first before checking out")]
    NotCheckedIn,

    #[error("Already checked out today")]
    AlreadyCheckedOut { check_out: NaiveDateTime },

    #[error("storage failure: {0}")]
    Store(#[from] StoreError),
}

impl AttendanceError {
    /// True for failures that are not the caller's fault.
    pub fn is_unexpected(&self) -> bool {
        matches!(self, AttendanceError::Store(_))
    }
}

impl ResponseError for AttendanceError {
    fn status_code(&self) -> StatusCode {
        match self {
            AttendanceError::EmployeeNotFound => StatusCode::NOT_FOUND,
            AttendanceError::AlreadyCheckedIn { .. }
            | AttendanceError::NoRecordToday
            | AttendanceError::NotCheckedIn
            | AttendanceError::AlreadyCheckedOut { .. } => StatusCode::BAD_REQUEST,
            AttendanceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AttendanceError::AlreadyCheckedIn { check_in } => json!({
                "error": self.to_string(),
                "check_in_time": check_in.format(TIME_FORMAT).to_string(),
            }),
            AttendanceError::AlreadyCheckedOut { check_out } => json!({
                "error": self.to_string(),
                "check_out_time": check_out.format(TIME_FORMAT).to_string(),
            }),
            // details stay in the logs
            AttendanceError::Store(_) => json!({ "error": "Internal Server Error" }),
            _ => json!({ "error": self.to_string() }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
