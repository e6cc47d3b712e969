use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::serde::deserialize_optional_uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
pub enum ApplicationStatus {
    Applied,
    Reviewed,
    Rejected,
    Accepted,
}

/// An application row as stored.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub user_id: Uuid,
    pub resume_url: String,
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

/// Application joined with its job, company and applicant, as returned by
/// the listing endpoints.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ApplicationDetails {
    pub id: Uuid,
    pub job_id: Uuid,
    pub job_title: String,
    pub company_name: String,
    pub applicant_id: Uuid,
    pub applicant_name: String,
    pub applicant_email: String,
    pub resume_url: String,
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

/// Body for applying to a job; the job id comes from the path.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateApplicationRequest {
    #[validate(url, length(max = 500))]
    pub resume_url: String,
    #[validate(length(max = 5000))]
    pub cover_letter: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateApplicationStatusRequest {
    pub status: ApplicationStatus,
}

/// Query parameters for the employer-side application listing.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EmployerApplicationsQuery {
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub job_id: Option<Uuid>,
}
