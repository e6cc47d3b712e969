//! Authorization guard: token extraction, identity resolution and the
//! role extractors.
//!
//! Resolution order for every guarded request: extract the access token,
//! verify it, resolve the identity (cache first, users table on a miss),
//! check the account is active, then check the role. Each step's failure is
//! a distinct error variant.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;

use crate::modules::auth::model::TokenType;
use crate::modules::users::model::{Identity, UserRole};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Name of the HttpOnly cookie carrying the access token.
pub const AUTH_COOKIE: &str = "access_token";

/// Pulls the access token off a request.
///
/// The `Authorization: Bearer` header wins; the `access_token` cookie is
/// only consulted when no usable bearer header is present.
pub fn extract_token(parts: &Parts) -> Option<String> {
    let bearer = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(&parts.headers)
        .get(AUTH_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// Resolves the identity behind a request's access token.
///
/// Verifies the token as an access token, then resolves the subject through
/// the identity cache with a users-table fallback that repopulates the
/// cache. Does not run the active check; callers decide what an inactive
/// identity means for them.
pub async fn resolve_identity(parts: &Parts, state: &AppState) -> Result<Identity, AppError> {
    let token = extract_token(parts).ok_or(AppError::NotAuthenticated)?;
    let claims = verify_token(&token, TokenType::Access, &state.jwt_config)?;
    let user_id = claims.subject()?;

    if let Some(identity) = state.identity_cache.get(&user_id) {
        return Ok(identity);
    }

    let identity = UserService::find_identity(&state.db, user_id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    state
        .identity_cache
        .put(identity.clone(), state.cache_config.identity_ttl());

    Ok(identity)
}

/// Extractor for any authenticated, active user.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // The rate-limit layer resolves the identity first when it is
        // applied to the route; reuse that instead of resolving twice.
        let identity = match parts.extensions.get::<Identity>() {
            Some(identity) => identity.clone(),
            None => resolve_identity(parts, state).await?,
        };

        if !identity.is_active {
            return Err(AppError::AccountDisabled);
        }

        Ok(CurrentUser(identity))
    }
}

/// Extractor for admin-only routes.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Identity);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(identity) = CurrentUser::from_request_parts(parts, state).await?;

        if identity.role != UserRole::Admin {
            return Err(AppError::forbidden("Admin access required"));
        }

        Ok(AdminUser(identity))
    }
}

/// Extractor for employer routes. Admins pass.
#[derive(Debug, Clone)]
pub struct EmployerUser(pub Identity);

impl FromRequestParts<AppState> for EmployerUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(identity) = CurrentUser::from_request_parts(parts, state).await?;

        if !matches!(identity.role, UserRole::Admin | UserRole::Employer) {
            return Err(AppError::forbidden("Employer access required"));
        }

        Ok(EmployerUser(identity))
    }
}

/// Extractor for job seeker routes. Admins pass.
#[derive(Debug, Clone)]
pub struct SeekerUser(pub Identity);

impl FromRequestParts<AppState> for SeekerUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(identity) = CurrentUser::from_request_parts(parts, state).await?;

        if !matches!(identity.role, UserRole::Admin | UserRole::Seeker) {
            return Err(AppError::forbidden("Job seeker access required"));
        }

        Ok(SeekerUser(identity))
    }
}
