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
    Company, CompanyFilterParams, CreateCompanyRequest, PaginatedCompaniesResponse,
    UpdateCompanyRequest,
};
use super::service::CompanyService;

/// Create a company
#[utoipa::path(
    post,
    path = "/api/companies",
    request_body = CreateCompanyRequest,
    responses(
        (status = 201, description = "Company created", body = Company),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Employer access required", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Companies"
)]
#[instrument(skip(state, employer, dto), fields(user_id = %employer.0.id))]
pub async fn create_company(
    State(state): State<AppState>,
    employer: EmployerUser,
    ValidatedJson(dto): ValidatedJson<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<Company>), AppError> {
    let company = CompanyService::create(&state.db, employer.0.id, dto).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

/// List companies
#[utoipa::path(
    get,
    path = "/api/companies",
    params(
        ("search" = Option<String>, Query, description = "Search company names"),
        ("limit" = Option<i64>, Query, description = "Page size (max 100)"),
        ("offset" = Option<i64>, Query, description = "Rows to skip"),
        ("page" = Option<i64>, Query, description = "1-based page, overrides offset")
    ),
    responses(
        (status = 200, description = "Paginated companies", body = PaginatedCompaniesResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse)
    ),
    tag = "Companies"
)]
#[instrument(skip(state, filters))]
pub async fn list_companies(
    State(state): State<AppState>,
    Query(filters): Query<CompanyFilterParams>,
) -> Result<(StatusCode, Json<PaginatedCompaniesResponse>), AppError> {
    let companies = CompanyService::list(&state.db, filters).await?;
    Ok((StatusCode::OK, Json(companies)))
}

/// List the caller's companies
#[utoipa::path(
    get,
    path = "/api/companies/my-companies",
    responses(
        (status = 200, description = "Companies owned by the caller", body = Vec<Company>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Employer access required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Companies"
)]
#[instrument(skip(state, employer), fields(user_id = %employer.0.id))]
pub async fn my_companies(
    State(state): State<AppState>,
    employer: EmployerUser,
) -> Result<(StatusCode, Json<Vec<Company>>), AppError> {
    let companies = CompanyService::list_mine(&state.db, employer.0.id).await?;
    Ok((StatusCode::OK, Json(companies)))
}

/// Get a company by id
#[utoipa::path(
    get,
    path = "/api/companies/{company_id}",
    params(("company_id" = Uuid, Path, description = "Company id")),
    responses(
        (status = 200, description = "The company", body = Company),
        (status = 404, description = "Company not found", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse)
    ),
    tag = "Companies"
)]
#[instrument(skip(state))]
pub async fn get_company(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Company>), AppError> {
    let company = CompanyService::get(&state.db, company_id).await?;
    Ok((StatusCode::OK, Json(company)))
}

/// Update a company
///
/// Only the owning employer or an admin may update.
#[utoipa::path(
    put,
    path = "/api/companies/{company_id}",
    params(("company_id" = Uuid, Path, description = "Company id")),
    request_body = UpdateCompanyRequest,
    responses(
        (status = 200, description = "Company updated", body = Company),
        (status = 403, description = "Not authorized to modify this company", body = ErrorResponse),
        (status = 404, description = "Company not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Companies"
)]
#[instrument(skip(state, user, dto), fields(user_id = %user.0.id))]
pub async fn update_company(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(company_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCompanyRequest>,
) -> Result<(StatusCode, Json<Company>), AppError> {
    let company = CompanyService::update(&state.db, &user.0, company_id, dto).await?;
    Ok((StatusCode::OK, Json(company)))
}

/// Delete a company
///
/// Only the owning employer or an admin may delete. Jobs and applications
/// under the company are deleted with it.
#[utoipa::path(
    delete,
    path = "/api/companies/{company_id}",
    params(("company_id" = Uuid, Path, description = "Company id")),
    responses(
        (status = 204, description = "Company deleted"),
        (status = 403, description = "Not authorized to modify this company", body = ErrorResponse),
        (status = 404, description = "Company not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Companies"
)]
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn delete_company(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(company_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    CompanyService::delete(&state.db, &user.0, company_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
