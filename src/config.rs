use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub db_max_connections: u32,

    // Rate limiting
    pub rate_protected_per_min: u32,

    pub api_prefix: String,
    pub log_dir: String,

    // Attendance rules
    pub overtime_threshold_hours: f64,
    pub annual_leave_allowance: i64,
    pub recent_activity_days: i64,
    pub recent_activity_limit: usize,
}

fn required(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("{key} must be set"))
}

fn parsed_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_addr: required("SERVER_ADDR")?,
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            db_max_connections: parsed_or("DB_MAX_CONNECTIONS", 10)?,

            rate_protected_per_min: parsed_or("RATE_PROTECTED_PER_MIN", 1000)?,

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),

            // 8h standard working day
            overtime_threshold_hours: parsed_or("OVERTIME_THRESHOLD_HOURS", 8.0)?,
            annual_leave_allowance: parsed_or("ANNUAL_LEAVE_ALLOWANCE", 24)?,
            recent_activity_days: parsed_or("RECENT_ACTIVITY_DAYS", 7)?,
            recent_activity_limit: parsed_or("RECENT_ACTIVITY_LIMIT", 5)?,
        })
    }
}

#[cfg(test)]
impl Config {
    /// Defaults used by the HTTP tests; no environment access.
    pub fn for_tests() -> Self {
        Self {
            database_url: String::new(),
            jwt_secret: "test-secret".to_string(),
            server_addr: "127.0.0.1:0".to_string(),
            db_max_connections: 1,
            rate_protected_per_min: 1000,
            api_prefix: "/api".to_string(),
            log_dir: "logs".to_string(),
            overtime_threshold_hours: 8.0,
            annual_leave_allowance: 24,
            recent_activity_days: 7,
            recent_activity_limit: 5,
        }
    }
}
