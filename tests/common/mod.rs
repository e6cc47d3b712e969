use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use jobline::cache::IdentityCache;
use jobline::config::cache::CacheConfig;
use jobline::config::cookie::CookieConfig;
use jobline::config::cors::CorsConfig;
use jobline::config::jwt::JwtConfig;
use jobline::config::rate_limit::RateLimitConfig;
use jobline::middleware::rate_limit::RateLimiter;
use jobline::router::init_router;
use jobline::state::AppState;
use jobline::utils::password::hash_password;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

/// Test state with deterministic configs and rate limiting off, so tests can
/// log in as often as they like.
pub fn test_state(pool: PgPool) -> AppState {
    test_state_with_limits(
        pool,
        RateLimitConfig {
            enabled: false,
            ..RateLimitConfig::default()
        },
    )
}

pub fn test_state_with_limits(pool: PgPool, rate_limits: RateLimitConfig) -> AppState {
    AppState {
        db: pool,
        jwt_config: JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry: 1800,
            refresh_token_expiry: 604800,
        },
        cookie_config: CookieConfig { secure: false },
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        cache_config: CacheConfig::default(),
        identity_cache: IdentityCache::new(),
        rate_limiter: RateLimiter::new(rate_limits),
    }
}

pub fn setup_test_app(pool: PgPool) -> Router {
    init_router(test_state(pool))
}

#[allow(dead_code)]
pub fn setup_app_with_limits(pool: PgPool, rate_limits: RateLimitConfig) -> Router {
    init_router(test_state_with_limits(pool, rate_limits))
}

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}

/// Inserts a user and profile directly. `role` is one of `admin`, `employer`
/// or `seeker`.
pub async fn create_user(
    db: &PgPool,
    email: &str,
    password: &str,
    role: &str,
    is_active: bool,
) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (email, password_hash, role, is_active)
         VALUES ($1, $2, $3::user_role, $4)
         RETURNING id",
    )
    .bind(email)
    .bind(&hashed)
    .bind(role)
    .bind(is_active)
    .fetch_one(db)
    .await
    .unwrap();

    sqlx::query("INSERT INTO profiles (user_id, full_name) VALUES ($1, $2)")
        .bind(id)
        .bind("Test User")
        .execute(db)
        .await
        .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
    }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub async fn create_company(db: &PgPool, owner_id: Uuid, name: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO companies (name, description, owner_id)
         VALUES ($1, $2, $3)
         RETURNING id",
    )
    .bind(name)
    .bind("A test company")
    .bind(owner_id)
    .fetch_one(db)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_job(db: &PgPool, company_id: Uuid, title: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO jobs (title, description, employment_type, company_id)
         VALUES ($1, $2, 'full_time', $3)
         RETURNING id",
    )
    .bind(title)
    .bind("A test job")
    .bind(company_id)
    .fetch_one(db)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn close_job(db: &PgPool, job_id: Uuid) {
    sqlx::query("UPDATE jobs SET status = 'closed' WHERE id = $1")
        .bind(job_id)
        .execute(db)
        .await
        .unwrap();
}

#[allow(dead_code)]
pub async fn create_application(db: &PgPool, job_id: Uuid, user_id: Uuid) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO applications (job_id, user_id, resume_url)
         VALUES ($1, $2, 'https://example.com/resume.pdf')
         RETURNING id",
    )
    .bind(job_id)
    .bind(user_id)
    .fetch_one(db)
    .await
    .unwrap()
}

/// Collects a response body into JSON.
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Logs in through the API and returns the token response body.
pub async fn login(app: &Router, email: &str, password: &str) -> serde_json::Value {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": email,
                "password": password
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    body_json(response).await
}

/// Logs in and returns just the access token.
#[allow(dead_code)]
pub async fn access_token(app: &Router, user: &TestUser) -> String {
    let tokens = login(app, &user.email, &user.password).await;
    tokens["access_token"].as_str().unwrap().to_string()
}
