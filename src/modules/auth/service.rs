use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::cache::IdentityCache;
use crate::config::jwt::JwtConfig;
use crate::modules::users::model::{Identity, UserResponse, UserRole};
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;
use crate::utils::jwt::{create_access_token, create_refresh_token, verify_token};
use crate::utils::password::{hash_password, validate_strength, verify_password};
use crate::utils::token_hash::hash_token;

use super::model::{
    ChangePasswordRequest, LoginRequest, RegisterRequest, TokenResponse, TokenType,
};
use super::store::RefreshTokenStore;

pub struct AuthService;

impl AuthService {
    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn register(db: &PgPool, dto: RegisterRequest) -> Result<UserResponse, AppError> {
        validate_strength(&dto.password)?;

        let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
            .bind(&dto.email)
            .fetch_optional(db)
            .await?;

        if existing.is_some() {
            return Err(AppError::bad_request("Email already registered"));
        }

        let password_hash = hash_password(&dto.password)?;
        let role = UserRole::from(dto.role);
        // Employers start disabled until an admin approves the account.
        let is_active = role != UserRole::Employer;

        let mut tx = db.begin().await?;

        let (id, created_at) = sqlx::query_as::<_, (Uuid, DateTime<Utc>)>(
            "INSERT INTO users (email, password_hash, role, is_active)
             VALUES ($1, $2, $3, $4)
             RETURNING id, created_at",
        )
        .bind(&dto.email)
        .bind(&password_hash)
        .bind(role)
        .bind(is_active)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            // The pre-check races with concurrent registrations; the unique
            // index is the authority.
            if err
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation())
            {
                AppError::bad_request("Email already registered")
            } else {
                AppError::from(err)
            }
        })?;

        sqlx::query("INSERT INTO profiles (user_id, full_name) VALUES ($1, $2)")
            .bind(id)
            .bind(&dto.full_name)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(UserResponse {
            id,
            email: dto.email,
            role,
            is_active,
            created_at,
            full_name: dto.full_name,
        })
    }

    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let user = UserService::find_by_email(db, &dto.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        // Same error for unknown email and wrong password, so the endpoint
        // cannot be used to probe which addresses have accounts.
        if !verify_password(&dto.password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(AppError::AccountDisabled);
        }

        Self::issue_pair(db, user.id, user.role, jwt_config).await
    }

    /// Rotates a refresh token: consumes the presented one and mints a new
    /// pair in a single transaction.
    ///
    /// The user row is re-read inside the transaction, so the new access
    /// token carries the role as of now, not as of the previous login.
    #[instrument(skip_all)]
    pub async fn refresh(
        db: &PgPool,
        refresh_token: &str,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        verify_token(refresh_token, TokenType::Refresh, jwt_config)?;

        let presented_hash = hash_token(refresh_token);

        let mut tx = db.begin().await?;

        let Some(user_id) = RefreshTokenStore::claim(&mut *tx, &presented_hash).await? else {
            return Err(AppError::RefreshTokenInvalid);
        };

        let identity = sqlx::query_as::<_, Identity>(
            "SELECT id, email, role, is_active FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(identity) = identity else {
            tx.commit().await?;
            return Err(AppError::RefreshTokenInvalid);
        };

        if !identity.is_active {
            // The token is burned either way: commit the claim, deny the pair.
            tx.commit().await?;
            return Err(AppError::AccountDisabled);
        }

        let access_token = create_access_token(identity.id, identity.role, jwt_config)?;
        let new_refresh = create_refresh_token(identity.id, identity.role, jwt_config)?;
        let expires_at = Utc::now() + Duration::seconds(jwt_config.refresh_token_expiry);

        RefreshTokenStore::record(&mut *tx, identity.id, &hash_token(&new_refresh), expires_at)
            .await?;

        tx.commit().await?;

        Ok(TokenResponse::new(access_token, new_refresh))
    }

    /// Revokes the presented refresh token, if any. Logout never fails over
    /// an unknown or already revoked token.
    #[instrument(skip_all)]
    pub async fn logout(db: &PgPool, refresh_token: Option<&str>) -> Result<(), AppError> {
        if let Some(token) = refresh_token {
            RefreshTokenStore::revoke(db, &hash_token(token)).await?;
        }
        Ok(())
    }

    /// Revokes every live refresh token the user holds. Returns the count.
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn logout_all(db: &PgPool, user_id: Uuid) -> Result<u64, AppError> {
        RefreshTokenStore::revoke_all(db, user_id).await
    }

    pub async fn me(db: &PgPool, user_id: Uuid) -> Result<UserResponse, AppError> {
        let user = sqlx::query_as::<_, UserResponse>(
            "SELECT u.id, u.email, u.role, u.is_active, u.created_at, p.full_name
             FROM users u
             JOIN profiles p ON p.user_id = u.id
             WHERE u.id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or(AppError::UserNotFound)?;

        Ok(user)
    }

    /// Changes the password and ends every session: all refresh tokens are
    /// revoked and the cached identity dropped, so only the login that
    /// follows stays valid.
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn change_password(
        db: &PgPool,
        cache: &IdentityCache,
        user_id: Uuid,
        dto: ChangePasswordRequest,
    ) -> Result<u64, AppError> {
        let user = UserService::find_by_id(db, user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if !verify_password(&dto.current_password, &user.password_hash)? {
            return Err(AppError::bad_request("Current password is incorrect"));
        }

        validate_strength(&dto.new_password)?;
        let password_hash = hash_password(&dto.new_password)?;

        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(user_id)
            .bind(&password_hash)
            .execute(db)
            .await?;

        let revoked = RefreshTokenStore::revoke_all(db, user_id).await?;
        cache.invalidate(&user_id);

        Ok(revoked)
    }

    /// Mints an access/refresh pair and records the refresh digest.
    pub async fn issue_pair(
        db: &PgPool,
        user_id: Uuid,
        role: UserRole,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let access_token = create_access_token(user_id, role, jwt_config)?;
        let refresh_token = create_refresh_token(user_id, role, jwt_config)?;
        let expires_at = Utc::now() + Duration::seconds(jwt_config.refresh_token_expiry);

        RefreshTokenStore::record(db, user_id, &hash_token(&refresh_token), expires_at).await?;

        Ok(TokenResponse::new(access_token, refresh_token))
    }
}
