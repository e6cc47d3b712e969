use std::env;

/// Auth cookie configuration.
///
/// The access token cookie is always HttpOnly, SameSite=Strict and scoped to
/// `/`; only the Secure attribute is configurable so local HTTP development
/// works.
///
/// # Environment Variables
///
/// - `COOKIE_SECURE`: set the Secure attribute (default: `true`)
#[derive(Clone, Debug)]
pub struct CookieConfig {
    pub secure: bool,
}

impl CookieConfig {
    pub fn from_env() -> Self {
        Self {
            secure: env::var("COOKIE_SECURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self { secure: true }
    }
}
