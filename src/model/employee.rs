use serde::Serialize;

/// Employee directory entry as this service sees it.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct EmployeeProfile {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Department name, if the employee is assigned to one
    pub department: Option<String>,
    /// Job title, if any
    pub job_title: Option<String>,
}

impl EmployeeProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
