use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::modules::users::model::{ProfileResponse, UpdateProfileDto};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/users/profile",
    responses(
        (status = 200, description = "Profile of the authenticated user", body = ProfileResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn get_my_profile(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<(StatusCode, Json<ProfileResponse>), AppError> {
    let profile = UserService::get_profile(&state.db, user.0.id)
        .await?
        .ok_or_else(|| AppError::not_found("Profile not found"))?;

    Ok((StatusCode::OK, Json(profile)))
}

/// Update the authenticated user's profile
///
/// Only the fields present in the request body change.
#[utoipa::path(
    put,
    path = "/api/users/profile",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, user, payload), fields(user_id = %user.0.id))]
pub async fn update_my_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<UpdateProfileDto>,
) -> Result<(StatusCode, Json<ProfileResponse>), AppError> {
    let profile = UserService::update_profile(&state.db, user.0.id, payload).await?;

    Ok((StatusCode::OK, Json(profile)))
}

/// Get a user's public profile
#[utoipa::path(
    get,
    path = "/api/users/profile/{user_id}",
    params(("user_id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Public profile", body = ProfileResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<(StatusCode, Json<ProfileResponse>), AppError> {
    let profile = UserService::get_profile(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Profile not found"))?;

    Ok((StatusCode::OK, Json(profile)))
}
