use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;
use tracing::instrument;

use crate::middleware::auth::{AUTH_COOKIE, CurrentUser};
use crate::modules::users::model::UserResponse;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

use super::model::{
    ChangePasswordRequest, LoginRequest, LogoutRequest, MessageResponse, RefreshRequest,
    RegisterRequest, TokenResponse,
};
use super::service::AuthService;

/// Builds the access token cookie mirrored alongside the JSON response, for
/// browser clients that cannot attach an Authorization header.
fn access_cookie(token: &str, state: &AppState) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token.to_string()))
        .http_only(true)
        .secure(state.cookie_config.secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(Duration::seconds(state.jwt_config.access_token_expiry))
        .build()
}

fn clear_access_cookie(state: &AppState) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, ""))
        .http_only(true)
        .secure(state.cookie_config.secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}

/// Register a new account
///
/// Visitors register as employer or seeker. Employer accounts start disabled
/// and must be approved by an admin before they can log in.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Invalid or weak password", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = AuthService::register(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Log in with email and password
///
/// Returns an access/refresh pair and mirrors the access token into the
/// `access_token` cookie.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Incorrect email or password", body = ErrorResponse),
        (status = 403, description = "Account disabled", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, dto))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<TokenResponse>), AppError> {
    let tokens = AuthService::login(&state.db, dto, &state.jwt_config).await?;
    let jar = jar.add(access_cookie(&tokens.access_token, &state));
    Ok((jar, Json(tokens)))
}

/// Exchange a refresh token for a new pair
///
/// The presented refresh token is consumed; presenting it again fails. The
/// new access token also replaces the `access_token` cookie.
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New token pair", body = TokenResponse),
        (status = 401, description = "Invalid, expired, revoked, or already used refresh token", body = ErrorResponse),
        (status = 403, description = "Account disabled", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, dto))]
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<RefreshRequest>,
) -> Result<(CookieJar, Json<TokenResponse>), AppError> {
    let tokens = AuthService::refresh(&state.db, &dto.refresh_token, &state.jwt_config).await?;
    let jar = jar.add(access_cookie(&tokens.access_token, &state));
    Ok((jar, Json(tokens)))
}

/// Log out
///
/// Revokes the refresh token in the body, when one is sent, and clears the
/// `access_token` cookie. Always succeeds, even for unknown tokens.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    request_body = LogoutRequest,
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, dto))]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    dto: Option<Json<LogoutRequest>>,
) -> Result<(CookieJar, Json<MessageResponse>), AppError> {
    let refresh_token = dto.as_ref().and_then(|body| body.refresh_token.as_deref());
    AuthService::logout(&state.db, refresh_token).await?;

    let jar = jar.add(clear_access_cookie(&state));
    Ok((jar, Json(MessageResponse::new("Successfully logged out"))))
}

/// Log out of every session
///
/// Revokes all of the caller's refresh tokens. Outstanding access tokens
/// still run out their short lifetime.
#[utoipa::path(
    post,
    path = "/api/auth/logout-all",
    responses(
        (status = 200, description = "All sessions revoked", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, user), fields(user_id = %user.0.id))]
pub async fn logout_all(
    State(state): State<AppState>,
    jar: CookieJar,
    user: CurrentUser,
) -> Result<(CookieJar, Json<MessageResponse>), AppError> {
    let revoked = AuthService::logout_all(&state.db, user.0.id).await?;

    let jar = jar.add(clear_access_cookie(&state));
    Ok((
        jar,
        Json(MessageResponse::new(format!(
            "Revoked {revoked} refresh tokens"
        ))),
    ))
}

/// Get the authenticated user
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "The authenticated user", body = UserResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Account disabled", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn me(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<UserResponse>, AppError> {
    let response = AuthService::me(&state.db, user.0.id).await?;
    Ok(Json(response))
}

/// Change password
///
/// Verifies the current password, stores the new one, and revokes every
/// refresh token. All devices must log in again.
#[utoipa::path(
    post,
    path = "/api/auth/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed, sessions revoked", body = MessageResponse),
        (status = 400, description = "Current password is incorrect", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, user, dto), fields(user_id = %user.0.id))]
pub async fn change_password(
    State(state): State<AppState>,
    jar: CookieJar,
    user: CurrentUser,
    ValidatedJson(dto): ValidatedJson<ChangePasswordRequest>,
) -> Result<(CookieJar, Json<MessageResponse>), AppError> {
    AuthService::change_password(&state.db, &state.identity_cache, user.0.id, dto).await?;

    let jar = jar.add(clear_access_cookie(&state));
    Ok((
        jar,
        Json(MessageResponse::new(
            "Password changed successfully. Please log in again.",
        )),
    ))
}
