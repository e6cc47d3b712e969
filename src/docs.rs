use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::admin::model::{
    PaginatedUsersResponse, UpdateRoleRequest, UpdateStatusRequest, UserFilterParams,
};
use crate::modules::applications::model::{
    Application, ApplicationDetails, ApplicationStatus, CreateApplicationRequest,
    EmployerApplicationsQuery, UpdateApplicationStatusRequest,
};
use crate::modules::auth::model::{
    ChangePasswordRequest, LoginRequest, LogoutRequest, MessageResponse, RefreshRequest,
    RegisterRequest, RegisterRole, TokenResponse,
};
use crate::modules::companies::model::{
    Company, CompanyFilterParams, CreateCompanyRequest, PaginatedCompaniesResponse,
    UpdateCompanyRequest,
};
use crate::modules::jobs::model::{
    CreateJobRequest, EmploymentType, Job, JobFilterParams, JobStatus, JobWithCompany,
    PaginatedJobsResponse, UpdateJobRequest,
};
use crate::modules::users::model::{
    Identity, Profile, ProfileResponse, UpdateProfileDto, UserResponse, UserRole,
};
use crate::utils::errors::{ErrorDetail, ErrorResponse};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::refresh,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::logout_all,
        crate::modules::auth::controller::me,
        crate::modules::auth::controller::change_password,
        crate::modules::users::controller::get_my_profile,
        crate::modules::users::controller::update_my_profile,
        crate::modules::users::controller::get_user_profile,
        crate::modules::admin::controller::list_users,
        crate::modules::admin::controller::get_user,
        crate::modules::admin::controller::change_role,
        crate::modules::admin::controller::set_status,
        crate::modules::admin::controller::delete_user,
        crate::modules::admin::controller::pending_employers,
        crate::modules::admin::controller::approve_employer,
        crate::modules::admin::controller::reject_employer,
        crate::modules::companies::controller::create_company,
        crate::modules::companies::controller::list_companies,
        crate::modules::companies::controller::my_companies,
        crate::modules::companies::controller::get_company,
        crate::modules::companies::controller::update_company,
        crate::modules::companies::controller::delete_company,
        crate::modules::jobs::controller::create_job,
        crate::modules::jobs::controller::list_jobs,
        crate::modules::jobs::controller::get_job,
        crate::modules::jobs::controller::update_job,
        crate::modules::jobs::controller::delete_job,
        crate::modules::applications::controller::apply,
        crate::modules::applications::controller::my_applications,
        crate::modules::applications::controller::employer_applications,
        crate::modules::applications::controller::get_application,
        crate::modules::applications::controller::update_status,
    ),
    components(
        schemas(
            UserRole,
            Identity,
            Profile,
            UserResponse,
            ProfileResponse,
            UpdateProfileDto,
            RegisterRole,
            RegisterRequest,
            LoginRequest,
            TokenResponse,
            RefreshRequest,
            LogoutRequest,
            ChangePasswordRequest,
            MessageResponse,
            UserFilterParams,
            PaginatedUsersResponse,
            UpdateRoleRequest,
            UpdateStatusRequest,
            Company,
            CreateCompanyRequest,
            UpdateCompanyRequest,
            CompanyFilterParams,
            PaginatedCompaniesResponse,
            EmploymentType,
            JobStatus,
            Job,
            JobWithCompany,
            CreateJobRequest,
            UpdateJobRequest,
            JobFilterParams,
            PaginatedJobsResponse,
            ApplicationStatus,
            Application,
            ApplicationDetails,
            CreateApplicationRequest,
            EmployerApplicationsQuery,
            UpdateApplicationStatusRequest,
            PaginationMeta,
            PaginationParams,
            ErrorResponse,
            ErrorDetail,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login, and token lifecycle endpoints"),
        (name = "Users", description = "Profile endpoints"),
        (name = "Admin", description = "User administration endpoints"),
        (name = "Companies", description = "Company management endpoints"),
        (name = "Jobs", description = "Job posting endpoints"),
        (name = "Applications", description = "Job application endpoints")
    ),
    info(
        title = "Jobline API",
        version = "0.1.0",
        description = "A job marketplace REST API built with Rust, Axum, and PostgreSQL featuring JWT-based authentication with refresh token rotation.",
        contact(
            name = "API Support",
            email = "support@jobline.dev"
        ),
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
