use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::modules::jobs::model::JobStatus;
use crate::modules::users::model::{Identity, UserRole};
use crate::utils::errors::AppError;

use super::model::{
    Application, ApplicationDetails, ApplicationStatus, CreateApplicationRequest,
};

const APPLICATION_COLUMNS: &str =
    "id, job_id, user_id, resume_url, cover_letter, status, applied_at";

const DETAILS_QUERY: &str = "SELECT a.id, a.job_id, j.title AS job_title, \
     c.name AS company_name, a.user_id AS applicant_id, p.full_name AS applicant_name, \
     u.email AS applicant_email, a.resume_url, a.cover_letter, a.status, a.applied_at
     FROM applications a
     JOIN jobs j ON j.id = a.job_id
     JOIN companies c ON c.id = j.company_id
     JOIN users u ON u.id = a.user_id
     JOIN profiles p ON p.user_id = u.id";

pub struct ApplicationService;

impl ApplicationService {
    /// Applies the caller to an open job. One application per job per user;
    /// the unique index on (job_id, user_id) is the authority.
    #[instrument(skip(db, dto), fields(user_id = %user_id, job_id = %job_id))]
    pub async fn apply(
        db: &PgPool,
        user_id: Uuid,
        job_id: Uuid,
        dto: CreateApplicationRequest,
    ) -> Result<Application, AppError> {
        let status = sqlx::query_scalar::<_, JobStatus>("SELECT status FROM jobs WHERE id = $1")
            .bind(job_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found("Job not found"))?;

        if status != JobStatus::Open {
            return Err(AppError::bad_request(
                "This job is no longer accepting applications",
            ));
        }

        let application = sqlx::query_as::<_, Application>(&format!(
            "INSERT INTO applications (job_id, user_id, resume_url, cover_letter)
             VALUES ($1, $2, $3, $4)
             RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(job_id)
        .bind(user_id)
        .bind(&dto.resume_url)
        .bind(&dto.cover_letter)
        .fetch_one(db)
        .await
        .map_err(|err| {
            if err
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation())
            {
                AppError::bad_request("You have already applied to this job")
            } else {
                AppError::from(err)
            }
        })?;

        info!(application_id = %application.id, "application submitted");

        Ok(application)
    }

    pub async fn list_mine(
        db: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<ApplicationDetails>, AppError> {
        let applications = sqlx::query_as::<_, ApplicationDetails>(&format!(
            "{DETAILS_QUERY} WHERE a.user_id = $1 ORDER BY a.applied_at DESC"
        ))
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(applications)
    }

    /// Lists applications to the caller's jobs across all their companies,
    /// optionally narrowed to a single job. Admins see everything.
    #[instrument(skip(db, identity), fields(user_id = %identity.id))]
    pub async fn list_for_employer(
        db: &PgPool,
        identity: &Identity,
        job_id: Option<Uuid>,
    ) -> Result<Vec<ApplicationDetails>, AppError> {
        if identity.role != UserRole::Employer && identity.role != UserRole::Admin {
            return Err(AppError::forbidden("Employer or admin access required"));
        }

        let mut where_clause = String::from(" WHERE 1=1");
        let mut params = Vec::new();

        if identity.role == UserRole::Employer {
            params.push(identity.id.to_string());
            where_clause.push_str(&format!(" AND c.owner_id = ${}::uuid", params.len()));
        }

        if let Some(job_id) = job_id {
            params.push(job_id.to_string());
            where_clause.push_str(&format!(" AND a.job_id = ${}::uuid", params.len()));
        }

        let query = format!("{DETAILS_QUERY}{where_clause} ORDER BY a.applied_at DESC");

        let mut sql = sqlx::query_as::<_, ApplicationDetails>(&query);
        for param in params {
            sql = sql.bind(param);
        }
        let applications = sql.fetch_all(db).await?;

        Ok(applications)
    }

    /// Fetches one application with its joined detail. Visible to the
    /// applicant, the owning employer, and admins.
    pub async fn get_details(
        db: &PgPool,
        identity: &Identity,
        application_id: Uuid,
    ) -> Result<ApplicationDetails, AppError> {
        let details = sqlx::query_as::<_, ApplicationDetails>(&format!(
            "{DETAILS_QUERY} WHERE a.id = $1"
        ))
        .bind(application_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Application not found"))?;

        let is_applicant = details.applicant_id == identity.id;
        let is_owner = Self::job_owner(db, application_id).await? == identity.id;

        if !(is_applicant || is_owner || identity.role == UserRole::Admin) {
            return Err(AppError::forbidden(
                "Not authorized to view this application",
            ));
        }

        Ok(details)
    }

    /// Moves an application through the review pipeline. Only the employer
    /// owning the job, or an admin, may do this.
    #[instrument(skip(db, identity), fields(application_id = %application_id))]
    pub async fn update_status(
        db: &PgPool,
        identity: &Identity,
        application_id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Application, AppError> {
        let owner_id = Self::job_owner(db, application_id).await?;

        if identity.role != UserRole::Admin && owner_id != identity.id {
            return Err(AppError::forbidden(
                "Not authorized to update this application",
            ));
        }

        let application = sqlx::query_as::<_, Application>(&format!(
            "UPDATE applications SET status = $2 WHERE id = $1
             RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(application_id)
        .bind(status)
        .fetch_one(db)
        .await?;

        info!(application_id = %application_id, status = ?status, "application status updated");

        Ok(application)
    }

    async fn job_owner(db: &PgPool, application_id: Uuid) -> Result<Uuid, AppError> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT c.owner_id FROM applications a
             JOIN jobs j ON j.id = a.job_id
             JOIN companies c ON c.id = j.company_id
             WHERE a.id = $1",
        )
        .bind(application_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Application not found"))
    }
}
