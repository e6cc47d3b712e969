use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::cache::IdentityCache;
use crate::modules::auth::store::RefreshTokenStore;
use crate::modules::users::model::{UserResponse, UserRole};
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

use super::model::{PaginatedUsersResponse, UserFilterParams};

const USER_COLUMNS: &str = "u.id, u.email, u.role, u.is_active, u.created_at, p.full_name";

pub struct AdminService;

impl AdminService {
    #[instrument(skip(db, filters))]
    pub async fn list_users(
        db: &PgPool,
        filters: UserFilterParams,
    ) -> Result<PaginatedUsersResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut where_clause = String::new();
        let mut params = Vec::new();

        if let Some(role) = filters.role {
            params.push(role.as_str().to_string());
            where_clause.push_str(&format!(" AND u.role = ${}::user_role", params.len()));
        }

        if let Some(is_active) = filters.is_active {
            params.push(is_active.to_string());
            where_clause.push_str(&format!(" AND u.is_active = ${}::boolean", params.len()));
        }

        if let Some(search) = &filters.search {
            params.push(format!("%{search}%"));
            let email_param = params.len();
            params.push(format!("%{search}%"));
            where_clause.push_str(&format!(
                " AND (u.email ILIKE ${email_param} OR p.full_name ILIKE ${})",
                params.len()
            ));
        }

        let mut count_query = String::from(
            "SELECT COUNT(*) FROM users u JOIN profiles p ON p.user_id = u.id WHERE 1=1",
        );
        count_query.push_str(&where_clause);

        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await?;

        let mut data_query = format!(
            "SELECT {USER_COLUMNS} FROM users u JOIN profiles p ON p.user_id = u.id WHERE 1=1"
        );
        data_query.push_str(&where_clause);
        data_query.push_str(" ORDER BY u.created_at DESC");
        data_query.push_str(&format!(" LIMIT {limit} OFFSET {offset}"));

        let mut data_sql = sqlx::query_as::<_, UserResponse>(&data_query);
        for param in params {
            data_sql = data_sql.bind(param);
        }
        let users = data_sql.fetch_all(db).await?;

        Ok(PaginatedUsersResponse {
            data: users,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    pub async fn get_user(db: &PgPool, user_id: Uuid) -> Result<UserResponse, AppError> {
        let user = sqlx::query_as::<_, UserResponse>(&format!(
            "SELECT {USER_COLUMNS} FROM users u JOIN profiles p ON p.user_id = u.id
             WHERE u.id = $1"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

        Ok(user)
    }

    /// Changes a user's role. The cached identity is dropped so the next
    /// guarded request sees the new role immediately; existing sessions keep
    /// working and pick the role up on their next token rotation.
    #[instrument(skip(db, cache), fields(user_id = %user_id))]
    pub async fn change_role(
        db: &PgPool,
        cache: &IdentityCache,
        admin_id: Uuid,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<UserResponse, AppError> {
        if admin_id == user_id {
            return Err(AppError::bad_request("Cannot change your own role"));
        }

        let updated = sqlx::query("UPDATE users SET role = $2 WHERE id = $1")
            .bind(user_id)
            .bind(role)
            .execute(db)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found("User not found"));
        }

        cache.invalidate(&user_id);
        info!(user_id = %user_id, role = role.as_str(), "user role changed");

        Self::get_user(db, user_id).await
    }

    /// Enables or disables an account. Disabling also revokes every refresh
    /// token, so the account cannot mint new access tokens either.
    #[instrument(skip(db, cache), fields(user_id = %user_id))]
    pub async fn set_status(
        db: &PgPool,
        cache: &IdentityCache,
        admin_id: Uuid,
        user_id: Uuid,
        is_active: bool,
    ) -> Result<UserResponse, AppError> {
        if admin_id == user_id && !is_active {
            return Err(AppError::bad_request("Cannot disable your own account"));
        }

        let updated = sqlx::query("UPDATE users SET is_active = $2 WHERE id = $1")
            .bind(user_id)
            .bind(is_active)
            .execute(db)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found("User not found"));
        }

        if !is_active {
            let revoked = RefreshTokenStore::revoke_all(db, user_id).await?;
            info!(user_id = %user_id, revoked, "account disabled, sessions revoked");
        }

        cache.invalidate(&user_id);

        Self::get_user(db, user_id).await
    }

    /// Deletes an account. Profiles, refresh tokens, companies, jobs and
    /// applications all go with it through foreign key cascades.
    #[instrument(skip(db, cache), fields(user_id = %user_id))]
    pub async fn delete_user(
        db: &PgPool,
        cache: &IdentityCache,
        admin_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        if admin_id == user_id {
            return Err(AppError::bad_request("Cannot delete your own account"));
        }

        let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(db)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::not_found("User not found"));
        }

        cache.invalidate(&user_id);
        info!(user_id = %user_id, "user deleted");

        Ok(())
    }

    /// Lists employer registrations still waiting for approval.
    pub async fn pending_employers(db: &PgPool) -> Result<Vec<UserResponse>, AppError> {
        let pending = sqlx::query_as::<_, UserResponse>(&format!(
            "SELECT {USER_COLUMNS} FROM users u JOIN profiles p ON p.user_id = u.id
             WHERE u.role = 'employer' AND u.is_active = FALSE
             ORDER BY u.created_at DESC"
        ))
        .fetch_all(db)
        .await?;

        Ok(pending)
    }

    #[instrument(skip(db, cache), fields(user_id = %user_id))]
    pub async fn approve_employer(
        db: &PgPool,
        cache: &IdentityCache,
        user_id: Uuid,
    ) -> Result<UserResponse, AppError> {
        let is_active = sqlx::query_scalar::<_, bool>(
            "SELECT is_active FROM users WHERE id = $1 AND role = 'employer'",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Employer not found"))?;

        if is_active {
            return Err(AppError::bad_request("Employer is already approved"));
        }

        sqlx::query("UPDATE users SET is_active = TRUE WHERE id = $1")
            .bind(user_id)
            .execute(db)
            .await?;

        cache.invalidate(&user_id);
        info!(user_id = %user_id, "employer approved");

        Self::get_user(db, user_id).await
    }

    #[instrument(skip(db, cache), fields(user_id = %user_id))]
    pub async fn reject_employer(
        db: &PgPool,
        cache: &IdentityCache,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        let is_active = sqlx::query_scalar::<_, bool>(
            "SELECT is_active FROM users WHERE id = $1 AND role = 'employer'",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Employer not found"))?;

        if is_active {
            return Err(AppError::bad_request(
                "Cannot reject an already approved employer",
            ));
        }

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(db)
            .await?;

        cache.invalidate(&user_id);
        info!(user_id = %user_id, "employer registration rejected");

        Ok(())
    }
}
