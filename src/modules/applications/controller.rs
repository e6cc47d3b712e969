use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::{CurrentUser, SeekerUser};
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

use super::model::{
    Application, ApplicationDetails, CreateApplicationRequest, EmployerApplicationsQuery,
    UpdateApplicationStatusRequest,
};
use super::service::ApplicationService;

/// Apply to a job
///
/// Seekers only; one application per job.
#[utoipa::path(
    post,
    path = "/api/applications/jobs/{job_id}/apply",
    params(("job_id" = Uuid, Path, description = "Job id")),
    request_body = CreateApplicationRequest,
    responses(
        (status = 201, description = "Application submitted", body = Application),
        (status = 400, description = "Job closed or already applied", body = ErrorResponse),
        (status = 403, description = "Seeker access required", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
#[instrument(skip(state, seeker, dto), fields(user_id = %seeker.0.id, job_id = %job_id))]
pub async fn apply(
    State(state): State<AppState>,
    seeker: SeekerUser,
    Path(job_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    let application = ApplicationService::apply(&state.db, seeker.0.id, job_id, dto).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// List the caller's applications
#[utoipa::path(
    get,
    path = "/api/applications/my-applications",
    responses(
        (status = 200, description = "Applications submitted by the caller", body = [ApplicationDetails]),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Seeker access required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
#[instrument(skip(state, seeker), fields(user_id = %seeker.0.id))]
pub async fn my_applications(
    State(state): State<AppState>,
    seeker: SeekerUser,
) -> Result<(StatusCode, Json<Vec<ApplicationDetails>>), AppError> {
    let applications = ApplicationService::list_mine(&state.db, seeker.0.id).await?;
    Ok((StatusCode::OK, Json(applications)))
}

/// List applications to the caller's jobs
///
/// Covers every company the caller owns; admins see all applications.
#[utoipa::path(
    get,
    path = "/api/applications/employer/applications",
    params(("job_id" = Option<Uuid>, Query, description = "Narrow to one job")),
    responses(
        (status = 200, description = "Applications to the caller's jobs", body = [ApplicationDetails]),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Employer or admin access required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
#[instrument(skip(state, user, query), fields(user_id = %user.0.id))]
pub async fn employer_applications(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<EmployerApplicationsQuery>,
) -> Result<(StatusCode, Json<Vec<ApplicationDetails>>), AppError> {
    let applications =
        ApplicationService::list_for_employer(&state.db, &user.0, query.job_id).await?;
    Ok((StatusCode::OK, Json(applications)))
}

/// Get an application by id
///
/// Visible to the applicant, the employer owning the job, and admins.
#[utoipa::path(
    get,
    path = "/api/applications/{application_id}",
    params(("application_id" = Uuid, Path, description = "Application id")),
    responses(
        (status = 200, description = "The application", body = ApplicationDetails),
        (status = 403, description = "Not authorized to view this application", body = ErrorResponse),
        (status = 404, description = "Application not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn get_application(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(application_id): Path<Uuid>,
) -> Result<(StatusCode, Json<ApplicationDetails>), AppError> {
    let details = ApplicationService::get_details(&state.db, &user.0, application_id).await?;
    Ok((StatusCode::OK, Json(details)))
}

/// Update an application's status
#[utoipa::path(
    put,
    path = "/api/applications/{application_id}/status",
    params(("application_id" = Uuid, Path, description = "Application id")),
    request_body = UpdateApplicationStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = Application),
        (status = 403, description = "Not authorized to update this application", body = ErrorResponse),
        (status = 404, description = "Application not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
#[instrument(skip(state, user, dto), fields(user_id = %user.0.id))]
pub async fn update_status(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(application_id): Path<Uuid>,
    Json(dto): Json<UpdateApplicationStatusRequest>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    let application =
        ApplicationService::update_status(&state.db, &user.0, application_id, dto.status).await?;
    Ok((StatusCode::OK, Json(application)))
}
