use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AdminUser;
use crate::modules::users::model::UserResponse;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};

use super::model::{
    PaginatedUsersResponse, UpdateRoleRequest, UpdateStatusRequest, UserFilterParams,
};
use super::service::AdminService;

/// List users
///
/// Supports filtering by role and status plus a search over email and name.
#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(
        ("role" = Option<String>, Query, description = "Filter by role"),
        ("is_active" = Option<bool>, Query, description = "Filter by account status"),
        ("search" = Option<String>, Query, description = "Search email and full name"),
        ("limit" = Option<i64>, Query, description = "Page size (max 100)"),
        ("offset" = Option<i64>, Query, description = "Rows to skip"),
        ("page" = Option<i64>, Query, description = "1-based page, overrides offset")
    ),
    responses(
        (status = 200, description = "Paginated users", body = PaginatedUsersResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, admin, filters), fields(admin_id = %admin.0.id))]
pub async fn list_users(
    State(state): State<AppState>,
    admin: AdminUser,
    Query(filters): Query<UserFilterParams>,
) -> Result<(StatusCode, Json<PaginatedUsersResponse>), AppError> {
    let users = AdminService::list_users(&state.db, filters).await?;
    Ok((StatusCode::OK, Json(users)))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/admin/users/{user_id}",
    params(("user_id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, admin), fields(admin_id = %admin.0.id))]
pub async fn get_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(user_id): Path<Uuid>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = AdminService::get_user(&state.db, user_id).await?;
    Ok((StatusCode::OK, Json(user)))
}

/// Change a user's role
///
/// Takes effect on the next guarded request; open sessions pick the new role
/// up at their next token rotation.
#[utoipa::path(
    put,
    path = "/api/admin/users/{user_id}/role",
    params(("user_id" = Uuid, Path, description = "User id")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = UserResponse),
        (status = 400, description = "Cannot change your own role", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, admin, dto), fields(admin_id = %admin.0.id))]
pub async fn change_role(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(user_id): Path<Uuid>,
    Json(dto): Json<UpdateRoleRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = AdminService::change_role(
        &state.db,
        &state.identity_cache,
        admin.0.id,
        user_id,
        dto.role,
    )
    .await?;
    Ok((StatusCode::OK, Json(user)))
}

/// Enable or disable a user
///
/// Disabling revokes the user's refresh tokens and evicts their cached
/// identity, so the lockout is immediate.
#[utoipa::path(
    put,
    path = "/api/admin/users/{user_id}/status",
    params(("user_id" = Uuid, Path, description = "User id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = UserResponse),
        (status = 400, description = "Cannot disable your own account", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, admin, dto), fields(admin_id = %admin.0.id))]
pub async fn set_status(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(user_id): Path<Uuid>,
    Json(dto): Json<UpdateStatusRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = AdminService::set_status(
        &state.db,
        &state.identity_cache,
        admin.0.id,
        user_id,
        dto.is_active,
    )
    .await?;
    Ok((StatusCode::OK, Json(user)))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/admin/users/{user_id}",
    params(("user_id" = Uuid, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Cannot delete your own account", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, admin), fields(admin_id = %admin.0.id))]
pub async fn delete_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    AdminService::delete_user(&state.db, &state.identity_cache, admin.0.id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List pending employer registrations
///
/// Employer accounts start disabled and appear here until approved or
/// rejected.
#[utoipa::path(
    get,
    path = "/api/admin/pending-employers",
    responses(
        (status = 200, description = "Employers awaiting approval", body = [UserResponse]),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, admin), fields(admin_id = %admin.0.id))]
pub async fn pending_employers(
    State(state): State<AppState>,
    admin: AdminUser,
) -> Result<(StatusCode, Json<Vec<UserResponse>>), AppError> {
    let pending = AdminService::pending_employers(&state.db).await?;
    Ok((StatusCode::OK, Json(pending)))
}

/// Approve an employer registration
#[utoipa::path(
    post,
    path = "/api/admin/approve-employer/{user_id}",
    params(("user_id" = Uuid, Path, description = "Employer user id")),
    responses(
        (status = 200, description = "Employer activated", body = UserResponse),
        (status = 400, description = "Employer is already approved", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Employer not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, admin), fields(admin_id = %admin.0.id))]
pub async fn approve_employer(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(user_id): Path<Uuid>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = AdminService::approve_employer(&state.db, &state.identity_cache, user_id).await?;
    Ok((StatusCode::OK, Json(user)))
}

/// Reject an employer registration
///
/// Deletes the account. Only valid while the registration is still pending.
#[utoipa::path(
    delete,
    path = "/api/admin/reject-employer/{user_id}",
    params(("user_id" = Uuid, Path, description = "Employer user id")),
    responses(
        (status = 204, description = "Registration rejected"),
        (status = 400, description = "Cannot reject an already approved employer", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Employer not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, admin), fields(admin_id = %admin.0.id))]
pub async fn reject_employer(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    AdminService::reject_employer(&state.db, &state.identity_cache, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
