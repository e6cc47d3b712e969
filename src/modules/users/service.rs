use sqlx::PgPool;
use uuid::Uuid;

use crate::modules::users::model::{Identity, ProfileResponse, UpdateProfileDto, User};
use crate::utils::errors::AppError;

pub struct UserService;

impl UserService {
    /// Resolves the minimal identity for a user id.
    ///
    /// This is the cache-miss path of the auth guard, so it selects only the
    /// columns authorization actually needs.
    pub async fn find_identity(db: &PgPool, user_id: Uuid) -> Result<Option<Identity>, AppError> {
        let identity = sqlx::query_as::<_, Identity>(
            "SELECT id, email, role, is_active FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;

        Ok(identity)
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, role, is_active, created_at
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, user_id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, role, is_active, created_at
             FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }

    /// Fetches a profile joined with the owning user's public fields.
    pub async fn get_profile(
        db: &PgPool,
        user_id: Uuid,
    ) -> Result<Option<ProfileResponse>, AppError> {
        let profile = sqlx::query_as::<_, ProfileResponse>(
            "SELECT p.user_id, u.email, u.role, p.full_name, p.headline, p.phone,
                    p.location, p.skills_text, p.linkedin_url
             FROM profiles p
             JOIN users u ON u.id = p.user_id
             WHERE p.user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;

        Ok(profile)
    }

    /// Applies a partial profile update. Absent fields keep their value.
    pub async fn update_profile(
        db: &PgPool,
        user_id: Uuid,
        dto: UpdateProfileDto,
    ) -> Result<ProfileResponse, AppError> {
        let updated = sqlx::query_scalar::<_, Uuid>(
            "UPDATE profiles SET
                full_name = COALESCE($2, full_name),
                headline = COALESCE($3, headline),
                phone = COALESCE($4, phone),
                location = COALESCE($5, location),
                skills_text = COALESCE($6, skills_text),
                linkedin_url = COALESCE($7, linkedin_url)
             WHERE user_id = $1
             RETURNING user_id",
        )
        .bind(user_id)
        .bind(&dto.full_name)
        .bind(&dto.headline)
        .bind(&dto.phone)
        .bind(&dto.location)
        .bind(&dto.skills_text)
        .bind(&dto.linkedin_url)
        .fetch_optional(db)
        .await?;

        if updated.is_none() {
            return Err(AppError::not_found("Profile not found"));
        }

        Self::get_profile(db, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found"))
    }
}
