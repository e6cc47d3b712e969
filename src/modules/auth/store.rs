//! Persistent refresh token tracking.
//!
//! Only SHA-256 digests of refresh tokens are stored. Presenting a token
//! means hashing it and looking the digest up, so a database leak exposes
//! nothing replayable.

use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::utils::errors::AppError;

pub struct RefreshTokenStore;

impl RefreshTokenStore {
    /// Records a freshly minted refresh token digest.
    ///
    /// Takes any executor so login can write through the pool while rotation
    /// writes inside its transaction.
    pub async fn record<'e>(
        executor: impl PgExecutor<'e>,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO refresh_tokens (user_id, token_hash, expires_at)
             VALUES ($1, $2, $3)",
        )
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Atomically consumes a live token digest, returning its owner.
    ///
    /// The `revoked = FALSE` guard makes this a compare-and-swap: when two
    /// requests race on the same token, exactly one sees a row to update and
    /// the other gets `None`.
    pub async fn claim<'e>(
        executor: impl PgExecutor<'e>,
        token_hash: &str,
    ) -> Result<Option<Uuid>, AppError> {
        let user_id = sqlx::query_scalar::<_, Uuid>(
            "UPDATE refresh_tokens
             SET revoked = TRUE
             WHERE token_hash = $1 AND revoked = FALSE AND expires_at > now()
             RETURNING user_id",
        )
        .bind(token_hash)
        .fetch_optional(executor)
        .await?;

        Ok(user_id)
    }

    /// Revokes a single token digest. Returns whether a live row was hit;
    /// revoking an unknown or already revoked token is not an error.
    pub async fn revoke(db: &PgPool, token_hash: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked = TRUE
             WHERE token_hash = $1 AND revoked = FALSE",
        )
        .bind(token_hash)
        .execute(db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Revokes every live token belonging to a user. Returns the count.
    pub async fn revoke_all(db: &PgPool, user_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked = TRUE
             WHERE user_id = $1 AND revoked = FALSE",
        )
        .bind(user_id)
        .execute(db)
        .await?;

        Ok(result.rows_affected())
    }
}
