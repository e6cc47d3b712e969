use sqlx::PgPool;
use uuid::Uuid;

use crate::modules::users::model::UserRole;
use crate::utils::password::{hash_password, validate_strength};

/// Creates an active admin account. Admin is not a registerable role, so
/// this is the only way one comes into existence.
pub async fn create_admin(
    db: &PgPool,
    email: &str,
    password: &str,
    full_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    validate_strength(password)?;

    let password_hash = hash_password(password)?;

    let mut tx = db.begin().await?;

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (email, password_hash, role, is_active)
         VALUES ($1, $2, $3, TRUE)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(email)
    .bind(&password_hash)
    .bind(UserRole::Admin)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or("User with this email already exists")?;

    sqlx::query("INSERT INTO profiles (user_id, full_name) VALUES ($1, $2)")
        .bind(id)
        .bind(full_name)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}
