use std::env;
use std::time::Duration;

/// Identity cache configuration.
///
/// # Environment Variables
///
/// - `CACHE_TTL_SECONDS`: lifetime of a cached identity in seconds
///   (default: `300`)
#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub identity_ttl_seconds: u64,
}

impl CacheConfig {
    pub fn from_env() -> Self {
        Self {
            identity_ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
        }
    }

    pub fn identity_ttl(&self) -> Duration {
        Duration::from_secs(self.identity_ttl_seconds)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            identity_ttl_seconds: 300,
        }
    }
}
