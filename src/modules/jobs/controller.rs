use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::{CurrentUser, EmployerUser};
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

use super::model::{
    CreateJobRequest, Job, JobFilterParams, JobWithCompany, PaginatedJobsResponse,
    UpdateJobRequest,
};
use super::service::JobService;

/// Post a job
///
/// The caller must own the company the job is posted under.
#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Job created", body = Job),
        (status = 400, description = "Invalid salary range", body = ErrorResponse),
        (status = 403, description = "Employer access required or not the company owner", body = ErrorResponse),
        (status = 404, description = "Company not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Jobs"
)]
#[instrument(skip(state, employer, dto), fields(user_id = %employer.0.id))]
pub async fn create_job(
    State(state): State<AppState>,
    employer: EmployerUser,
    ValidatedJson(dto): ValidatedJson<CreateJobRequest>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    let job = JobService::create(&state.db, &employer.0, dto).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// Search open jobs
#[utoipa::path(
    get,
    path = "/api/jobs",
    params(
        ("search" = Option<String>, Query, description = "Search title and description"),
        ("location" = Option<String>, Query, description = "Filter by location"),
        ("employment_type" = Option<String>, Query, description = "Filter by employment type"),
        ("salary_min" = Option<i32>, Query, description = "Minimum acceptable salary"),
        ("salary_max" = Option<i32>, Query, description = "Maximum salary budget"),
        ("skills" = Option<String>, Query, description = "Comma-separated skills, matches any"),
        ("company_id" = Option<Uuid>, Query, description = "Filter by company"),
        ("limit" = Option<i64>, Query, description = "Page size (max 100)"),
        ("offset" = Option<i64>, Query, description = "Rows to skip"),
        ("page" = Option<i64>, Query, description = "1-based page, overrides offset")
    ),
    responses(
        (status = 200, description = "Paginated open jobs", body = PaginatedJobsResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse)
    ),
    tag = "Jobs"
)]
#[instrument(skip(state, filters))]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(filters): Query<JobFilterParams>,
) -> Result<(StatusCode, Json<PaginatedJobsResponse>), AppError> {
    let jobs = JobService::list(&state.db, filters).await?;
    Ok((StatusCode::OK, Json(jobs)))
}

/// Get a job by id
#[utoipa::path(
    get,
    path = "/api/jobs/{job_id}",
    params(("job_id" = Uuid, Path, description = "Job id")),
    responses(
        (status = 200, description = "The job", body = JobWithCompany),
        (status = 404, description = "Job not found", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse)
    ),
    tag = "Jobs"
)]
#[instrument(skip(state))]
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<(StatusCode, Json<JobWithCompany>), AppError> {
    let job = JobService::get(&state.db, job_id).await?;
    Ok((StatusCode::OK, Json(job)))
}

/// Update a job
///
/// Only the owner of the job's company or an admin may update.
#[utoipa::path(
    put,
    path = "/api/jobs/{job_id}",
    params(("job_id" = Uuid, Path, description = "Job id")),
    request_body = UpdateJobRequest,
    responses(
        (status = 200, description = "Job updated", body = Job),
        (status = 400, description = "Invalid salary range", body = ErrorResponse),
        (status = 403, description = "Not authorized to modify this job", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Jobs"
)]
#[instrument(skip(state, user, dto), fields(user_id = %user.0.id))]
pub async fn update_job(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(job_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateJobRequest>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    let job = JobService::update(&state.db, &user.0, job_id, dto).await?;
    Ok((StatusCode::OK, Json(job)))
}

/// Delete a job
///
/// Applications to the job are deleted with it.
#[utoipa::path(
    delete,
    path = "/api/jobs/{job_id}",
    params(("job_id" = Uuid, Path, description = "Job id")),
    responses(
        (status = 204, description = "Job deleted"),
        (status = 403, description = "Not authorized to modify this job", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Jobs"
)]
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn delete_job(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(job_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    JobService::delete(&state.db, &user.0, job_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
