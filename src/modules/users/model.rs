//! User data models and DTOs.
//!
//! # Core Types
//!
//! - [`UserRole`] - marketplace role, mirrored by the Postgres `user_role` enum
//! - [`User`] - full user row, including the password hash; never serialized
//! - [`Identity`] - minimal resolved identity used for authorization decisions
//! - [`Profile`] - public profile attached to every user
//!
//! # Request DTOs
//!
//! - [`UpdateProfileDto`] - partial profile update

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Marketplace roles.
///
/// Admins manage the platform, employers own companies and jobs, seekers
/// apply to jobs. Role gates treat admin as a superset of the other two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Employer,
    Seeker,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Employer => "employer",
            Self::Seeker => "seeker",
        }
    }
}

/// A user row.
///
/// Carries the password hash, so this type is never serialized; responses
/// use [`UserResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// The minimal identity needed for authorization decisions.
///
/// Both the cache hit and the users-table fallback resolve into this one
/// type, so guard code never distinguishes where an identity came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
}

/// Public profile attached to every user at registration.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub headline: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub skills_text: Option<String>,
    pub linkedin_url: Option<String>,
}

/// Public user representation returned by auth and admin endpoints.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub full_name: String,
}

/// Profile joined with the owning user's public fields.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ProfileResponse {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub full_name: String,
    pub headline: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub skills_text: Option<String>,
    pub linkedin_url: Option<String>,
}

/// DTO for updating the caller's own profile. Only provided fields change.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, max = 255, message = "full_name must be 1-255 characters"))]
    pub full_name: Option<String>,
    #[validate(length(max = 500, message = "headline is too long"))]
    pub headline: Option<String>,
    #[validate(length(max = 50, message = "phone is too long"))]
    pub phone: Option<String>,
    #[validate(length(max = 255, message = "location is too long"))]
    pub location: Option<String>,
    pub skills_text: Option<String>,
    #[validate(url(message = "linkedin_url must be a valid URL"))]
    pub linkedin_url: Option<String>,
}
