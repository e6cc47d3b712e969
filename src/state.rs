use sqlx::PgPool;

use crate::cache::IdentityCache;
use crate::config::cache::CacheConfig;
use crate::config::cookie::CookieConfig;
use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::jwt::JwtConfig;
use crate::config::rate_limit::RateLimitConfig;
use crate::middleware::rate_limit::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cookie_config: CookieConfig,
    pub cors_config: CorsConfig,
    pub cache_config: CacheConfig,
    pub identity_cache: IdentityCache,
    pub rate_limiter: RateLimiter,
}

pub async fn init_app_state() -> AppState {
    AppState {
        db: init_db_pool().await,
        jwt_config: JwtConfig::from_env(),
        cookie_config: CookieConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        cache_config: CacheConfig::from_env(),
        identity_cache: IdentityCache::new(),
        rate_limiter: RateLimiter::new(RateLimitConfig::from_env()),
    }
}
