//! Server configuration

use crate::BoxError;

/// Value of `DATABASE_URL` that selects the in-memory store
pub const MEMORY_DATABASE_URL: &str = "memory://";

/// Server configuration, read once at process start
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL, or `memory://`
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// HS256 signing secret for bearer tokens
    pub jwt_secret: String,
    /// Token lifetime in days
    pub jwt_expires_days: i64,
    /// Argon2 time cost (iterations)
    pub hash_cost: u32,
    /// Allowed cross-origin source (`*` allows any)
    pub cors_origin: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let hash_cost = parse_var("PASSWORD_HASH_COST", std::env::var("PASSWORD_HASH_COST").ok(), 2)?;
        if hash_cost == 0 {
            return Err("PASSWORD_HASH_COST must be at least 1".into());
        }

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: parse_var("HTTP_PORT", std::env::var("HTTP_PORT").ok(), 8000)?,
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            jwt_expires_days: parse_var("JWT_EXPIRES_IN", std::env::var("JWT_EXPIRES_IN").ok(), 7)?,
            hash_cost,
            cors_origin: std::env::var("CORS_ORIGIN").unwrap_or_else(|_| "*".into()),
            request_timeout_secs: parse_var(
                "REQUEST_TIMEOUT_SECS",
                std::env::var("REQUEST_TIMEOUT_SECS").ok(),
                30,
            )?,
            environment,
        })
    }

    /// Configuration for tests and local runs against the in-memory store
    pub fn in_memory(jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: MEMORY_DATABASE_URL.into(),
            http_port: 0,
            environment: "development".into(),
            jwt_secret: jwt_secret.into(),
            jwt_expires_days: 7,
            hash_cost: 1,
            cors_origin: "*".into(),
            request_timeout_secs: 30,
        }
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }
}

/// Parse an optional env value, falling back to `default` when unset or empty
fn parse_var<T: std::str::FromStr>(
    name: &str,
    value: Option<String>,
    default: T,
) -> Result<T, BoxError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| format!("{name} has an invalid value: {raw}").into()),
    }
}
