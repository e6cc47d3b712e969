//! Fixed-window rate limiting by route class.
//!
//! Counters are kept in-process and keyed by `(subject, class)`: the subject
//! is `user:<id>` when the request carries a resolvable access token and
//! `ip:<addr>` otherwise, so an authenticated client cannot widen its budget
//! by hopping addresses. Buckets reset when their window elapses and are not
//! persisted across restarts.
//!
//! Each route class owns one budget shared by every route in the class. The
//! layer is applied per route with the named `limit_*` middleware functions.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;

use crate::config::rate_limit::RateLimitConfig;
use crate::middleware::auth::resolve_identity;
use crate::state::AppState;
use crate::utils::errors::AppError;

const MINUTE: Duration = Duration::from_secs(60);
const HOUR: Duration = Duration::from_secs(3600);
const DAY: Duration = Duration::from_secs(86400);

/// Routes sharing one rate budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteClass {
    Login,
    Register,
    PasswordReset,
    JobCreate,
    JobApply,
    CompanyCreate,
    PublicRead,
}

/// Requests admitted per fixed window.
#[derive(Debug, Clone, Copy)]
pub struct RatePolicy {
    pub limit: u32,
    pub window: Duration,
}

impl RouteClass {
    fn policy(self, config: &RateLimitConfig) -> RatePolicy {
        match self {
            Self::Login => RatePolicy {
                limit: config.login_per_minute,
                window: MINUTE,
            },
            Self::Register => RatePolicy {
                limit: config.register_per_minute,
                window: MINUTE,
            },
            Self::PasswordReset => RatePolicy {
                limit: config.password_reset_per_hour,
                window: HOUR,
            },
            Self::JobCreate => RatePolicy {
                limit: config.job_create_per_hour,
                window: HOUR,
            },
            Self::JobApply => RatePolicy {
                limit: config.job_apply_per_hour,
                window: HOUR,
            },
            Self::CompanyCreate => RatePolicy {
                limit: config.company_create_per_day,
                window: DAY,
            },
            Self::PublicRead => RatePolicy {
                limit: config.public_read_per_minute,
                window: MINUTE,
            },
        }
    }
}

struct RateBucket {
    window_start: Instant,
    count: u32,
}

/// Shared fixed-window limiter. Cloning is cheap; all clones share buckets.
#[derive(Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    buckets: Arc<DashMap<(String, RouteClass), RateBucket>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            buckets: Arc::new(DashMap::new()),
        }
    }

    pub fn enabled(&self) -> bool {
        self.config.enabled
    }

    /// Admits or rejects one request for `key` under the class budget.
    pub fn check(&self, key: &str, class: RouteClass) -> Result<(), AppError> {
        if !self.config.enabled {
            return Ok(());
        }
        self.check_at(key, class, Instant::now())
    }

    /// Check-and-increment under the bucket's entry lock, so concurrent
    /// requests for one key admit exactly `limit` within a window.
    fn check_at(&self, key: &str, class: RouteClass, now: Instant) -> Result<(), AppError> {
        let policy = class.policy(&self.config);

        let mut bucket = self
            .buckets
            .entry((key.to_string(), class))
            .or_insert_with(|| RateBucket {
                window_start: now,
                count: 0,
            });

        if now.duration_since(bucket.window_start) >= policy.window {
            bucket.window_start = now;
            bucket.count = 0;
        }

        if bucket.count >= policy.limit {
            let remaining = policy.window - now.duration_since(bucket.window_start);
            return Err(AppError::RateLimitExceeded {
                retry_after_seconds: ceil_seconds(remaining).max(1),
            });
        }

        bucket.count += 1;
        Ok(())
    }
}

fn ceil_seconds(duration: Duration) -> u64 {
    let secs = duration.as_secs();
    if duration.subsec_nanos() > 0 { secs + 1 } else { secs }
}

/// Best-effort client address for unauthenticated keying: proxy headers
/// first, then the peer address.
fn client_ip(parts: &Parts) -> String {
    if let Some(forwarded) = parts
        .headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    {
        if let Some(ip) = forwarded
            .split(',')
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            return ip.to_string();
        }
    }

    if let Some(real_ip) = parts
        .headers
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
    {
        return real_ip.to_string();
    }

    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Shared enforcement behind the named `limit_*` middleware.
///
/// Identity resolution runs before the handler so the bucket key can be the
/// user id; the resolved identity is stashed in request extensions for the
/// `CurrentUser` extractor. Resolution failure is not fatal here: the
/// request is keyed by IP and the guard rejects it properly later.
async fn enforce(state: AppState, req: Request, next: Next, class: RouteClass) -> Response {
    if !state.rate_limiter.enabled() {
        return next.run(req).await;
    }

    let (mut parts, body) = req.into_parts();

    let key = match resolve_identity(&parts, &state).await {
        Ok(identity) => {
            let key = format!("user:{}", identity.id);
            parts.extensions.insert(identity);
            key
        }
        Err(_) => format!("ip:{}", client_ip(&parts)),
    };

    if let Err(err) = state.rate_limiter.check(&key, class) {
        tracing::warn!(key = %key, class = ?class, "rate limit exceeded");
        return err.into_response();
    }

    next.run(Request::from_parts(parts, body)).await
}

pub async fn limit_login(State(state): State<AppState>, req: Request, next: Next) -> Response {
    enforce(state, req, next, RouteClass::Login).await
}

pub async fn limit_register(State(state): State<AppState>, req: Request, next: Next) -> Response {
    enforce(state, req, next, RouteClass::Register).await
}

pub async fn limit_password_reset(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    enforce(state, req, next, RouteClass::PasswordReset).await
}

pub async fn limit_job_create(State(state): State<AppState>, req: Request, next: Next) -> Response {
    enforce(state, req, next, RouteClass::JobCreate).await
}

pub async fn limit_job_apply(State(state): State<AppState>, req: Request, next: Next) -> Response {
    enforce(state, req, next, RouteClass::JobApply).await
}

pub async fn limit_company_create(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    enforce(state, req, next, RouteClass::CompanyCreate).await
}

pub async fn limit_public_read(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    enforce(state, req, next, RouteClass::PublicRead).await
}
