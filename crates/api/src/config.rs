use chrono::{FixedOffset, NaiveDate, NaiveDateTime, Utc};

use crate::auth::jwt::JwtConfig;

/// Environment name that hides internal error details from responses.
pub const PRODUCTION_ENV: &str = "production";

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on pooled database connections (default: `10`).
    pub db_max_connections: u32,
    /// Deployment environment name (default: `development`).
    pub app_env: String,
    /// Minutes after a session's start before a clock-in counts as late.
    pub late_grace_mins: i64,
    /// UTC offset of the school's wall clock, used for "today" and lateness.
    pub school_offset: FixedOffset,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                 |
    /// |--------------------------|-------------------------|
    /// | `HOST`                   | `0.0.0.0`               |
    /// | `PORT`                   | `5000`                  |
    /// | `CORS_ORIGINS`           | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                    |
    /// | `DB_MAX_CONNECTIONS`     | `10`                    |
    /// | `APP_ENV`                | `development`           |
    /// | `LATE_GRACE_MINS`        | `10`                    |
    /// | `SCHOOL_UTC_OFFSET_MINS` | `180`                   |
    ///
    /// # Panics
    ///
    /// Panics on malformed values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let late_grace_mins: i64 = std::env::var("LATE_GRACE_MINS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("LATE_GRACE_MINS must be a valid i64");

        let offset_mins: i32 = std::env::var("SCHOOL_UTC_OFFSET_MINS")
            .unwrap_or_else(|_| "180".into())
            .parse()
            .expect("SCHOOL_UTC_OFFSET_MINS must be a valid i32");
        let school_offset = FixedOffset::east_opt(offset_mins * 60)
            .expect("SCHOOL_UTC_OFFSET_MINS must be within +/- 24 hours");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            db_max_connections,
            app_env,
            late_grace_mins,
            school_offset,
            jwt,
        }
    }

    /// Whether the server runs in the production environment.
    pub fn is_production(&self) -> bool {
        self.app_env == PRODUCTION_ENV
    }

    /// Current wall-clock time at the school.
    pub fn local_now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.school_offset).naive_local()
    }

    /// Current date at the school.
    pub fn today(&self) -> NaiveDate {
        self.local_now().date()
    }
}
