use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::{PaginationMeta, PaginationParams};
use crate::utils::serde::deserialize_optional_uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "employment_type", rename_all = "snake_case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl EmploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullTime => "full_time",
            Self::PartTime => "part_time",
            Self::Contract => "contract",
            Self::Internship => "internship",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "job_status", rename_all = "lowercase")]
pub enum JobStatus {
    Open,
    Closed,
}

/// A job posting.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub employment_type: EmploymentType,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub required_skills: Option<String>,
    pub company_id: Uuid,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
}

/// A job row joined with its company's name, the shape returned by the
/// public listing and detail endpoints.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct JobWithCompany {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub employment_type: EmploymentType,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub required_skills: Option<String>,
    pub company_id: Uuid,
    pub company_name: String,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateJobRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    pub employment_type: EmploymentType,
    #[validate(range(min = 0))]
    pub salary_min: Option<i32>,
    #[validate(range(min = 0))]
    pub salary_max: Option<i32>,
    pub required_skills: Option<String>,
    pub company_id: Uuid,
}

/// Partial update; absent fields keep their value. Closing a job is a status
/// update to `closed`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateJobRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    pub employment_type: Option<EmploymentType>,
    #[validate(range(min = 0))]
    pub salary_min: Option<i32>,
    #[validate(range(min = 0))]
    pub salary_max: Option<i32>,
    pub required_skills: Option<String>,
    pub status: Option<JobStatus>,
}

/// Query parameters for the public job listing. Only open jobs are listed.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct JobFilterParams {
    /// Matches title and description, case-insensitively.
    pub search: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<EmploymentType>,
    /// Keeps jobs whose advertised maximum reaches this floor. Jobs without
    /// an advertised maximum are kept too.
    pub salary_min: Option<i32>,
    /// Keeps jobs whose advertised minimum fits under this ceiling. Jobs
    /// without an advertised minimum are kept too.
    pub salary_max: Option<i32>,
    /// Comma-separated skills; a job matches if any one of them appears in
    /// its required skills.
    pub skills: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub company_id: Option<Uuid>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedJobsResponse {
    pub data: Vec<JobWithCompany>,
    pub meta: PaginationMeta,
}
