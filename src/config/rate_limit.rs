use std::env;

/// Rate limit configuration for the API.
///
/// Limits are grouped by route class rather than by path, so several routes
/// can share one budget. Each limit is the number of requests admitted per
/// fixed window; the window length is fixed per class (see
/// [`crate::middleware::rate_limit::RouteClass`]).
#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    /// Master switch. When false every check passes.
    pub enabled: bool,
    /// Login and token refresh attempts per minute.
    pub login_per_minute: u32,
    /// Account registrations per minute.
    pub register_per_minute: u32,
    /// Password changes per hour.
    pub password_reset_per_hour: u32,
    /// Job postings per hour.
    pub job_create_per_hour: u32,
    /// Job applications per hour.
    pub job_apply_per_hour: u32,
    /// Company registrations per day.
    pub company_create_per_day: u32,
    /// Unauthenticated reads per minute.
    pub public_read_per_minute: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            login_per_minute: 5,
            register_per_minute: 3,
            password_reset_per_hour: 3,
            job_create_per_hour: 5,
            job_apply_per_hour: 10,
            company_create_per_day: 3,
            public_read_per_minute: 60,
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            enabled: env::var("RATE_LIMIT_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enabled),
            login_per_minute: parse_var("RATE_LIMIT_LOGIN_PER_MINUTE", defaults.login_per_minute),
            register_per_minute: parse_var(
                "RATE_LIMIT_REGISTER_PER_MINUTE",
                defaults.register_per_minute,
            ),
            password_reset_per_hour: parse_var(
                "RATE_LIMIT_PASSWORD_RESET_PER_HOUR",
                defaults.password_reset_per_hour,
            ),
            job_create_per_hour: parse_var(
                "RATE_LIMIT_JOB_CREATE_PER_HOUR",
                defaults.job_create_per_hour,
            ),
            job_apply_per_hour: parse_var(
                "RATE_LIMIT_JOB_APPLY_PER_HOUR",
                defaults.job_apply_per_hour,
            ),
            company_create_per_day: parse_var(
                "RATE_LIMIT_COMPANY_CREATE_PER_DAY",
                defaults.company_create_per_day,
            ),
            public_read_per_minute: parse_var(
                "RATE_LIMIT_PUBLIC_READ_PER_MINUTE",
                defaults.public_read_per_minute,
            ),
        }
    }
}

fn parse_var(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
