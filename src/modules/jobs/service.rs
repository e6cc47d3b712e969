use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::modules::users::model::{Identity, UserRole};
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

use super::model::{
    CreateJobRequest, Job, JobFilterParams, JobWithCompany, PaginatedJobsResponse,
    UpdateJobRequest,
};

const JOB_COLUMNS: &str = "id, title, description, location, employment_type, salary_min, \
                           salary_max, required_skills, company_id, status, created_at";

const JOB_WITH_COMPANY_COLUMNS: &str =
    "j.id, j.title, j.description, j.location, j.employment_type, j.salary_min, \
     j.salary_max, j.required_skills, j.company_id, c.name AS company_name, j.status, \
     j.created_at";

pub struct JobService;

impl JobService {
    #[instrument(skip(db, identity, dto), fields(user_id = %identity.id))]
    pub async fn create(
        db: &PgPool,
        identity: &Identity,
        dto: CreateJobRequest,
    ) -> Result<Job, AppError> {
        let owner_id =
            sqlx::query_scalar::<_, Uuid>("SELECT owner_id FROM companies WHERE id = $1")
                .bind(dto.company_id)
                .fetch_optional(db)
                .await?
                .ok_or_else(|| AppError::not_found("Company not found"))?;

        if identity.role != UserRole::Admin && owner_id != identity.id {
            return Err(AppError::forbidden(
                "Not authorized to create jobs for this company",
            ));
        }

        validate_salary_range(dto.salary_min, dto.salary_max)?;

        let job = sqlx::query_as::<_, Job>(&format!(
            "INSERT INTO jobs (title, description, location, employment_type,
                               salary_min, salary_max, required_skills, company_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {JOB_COLUMNS}"
        ))
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.location)
        .bind(dto.employment_type)
        .bind(dto.salary_min)
        .bind(dto.salary_max)
        .bind(&dto.required_skills)
        .bind(dto.company_id)
        .fetch_one(db)
        .await?;

        info!(job_id = %job.id, company_id = %job.company_id, "job created");

        Ok(job)
    }

    /// Lists open jobs. Closed jobs stay reachable by id but never appear
    /// here.
    #[instrument(skip(db, filters))]
    pub async fn list(
        db: &PgPool,
        filters: JobFilterParams,
    ) -> Result<PaginatedJobsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut where_clause = String::new();
        let mut params = Vec::new();

        if let Some(search) = &filters.search {
            params.push(format!("%{search}%"));
            let title_param = params.len();
            params.push(format!("%{search}%"));
            where_clause.push_str(&format!(
                " AND (j.title ILIKE ${title_param} OR j.description ILIKE ${})",
                params.len()
            ));
        }

        if let Some(location) = &filters.location {
            params.push(format!("%{location}%"));
            where_clause.push_str(&format!(" AND j.location ILIKE ${}", params.len()));
        }

        if let Some(employment_type) = filters.employment_type {
            params.push(employment_type.as_str().to_string());
            where_clause.push_str(&format!(
                " AND j.employment_type = ${}::employment_type",
                params.len()
            ));
        }

        // A job with no advertised bound on one side never disqualifies
        // itself on that side.
        if let Some(salary_min) = filters.salary_min {
            params.push(salary_min.to_string());
            where_clause.push_str(&format!(
                " AND (j.salary_max >= ${}::int OR j.salary_max IS NULL)",
                params.len()
            ));
        }

        if let Some(salary_max) = filters.salary_max {
            params.push(salary_max.to_string());
            where_clause.push_str(&format!(
                " AND (j.salary_min <= ${}::int OR j.salary_min IS NULL)",
                params.len()
            ));
        }

        if let Some(skills) = &filters.skills {
            let mut conditions = Vec::new();
            for skill in skills.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                params.push(format!("%{skill}%"));
                conditions.push(format!("j.required_skills ILIKE ${}", params.len()));
            }
            if !conditions.is_empty() {
                where_clause.push_str(&format!(" AND ({})", conditions.join(" OR ")));
            }
        }

        if let Some(company_id) = filters.company_id {
            params.push(company_id.to_string());
            where_clause.push_str(&format!(" AND j.company_id = ${}::uuid", params.len()));
        }

        let mut count_query = String::from(
            "SELECT COUNT(*) FROM jobs j JOIN companies c ON c.id = j.company_id
             WHERE j.status = 'open'",
        );
        count_query.push_str(&where_clause);

        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await?;

        let mut data_query = format!(
            "SELECT {JOB_WITH_COMPANY_COLUMNS} FROM jobs j
             JOIN companies c ON c.id = j.company_id
             WHERE j.status = 'open'"
        );
        data_query.push_str(&where_clause);
        data_query.push_str(" ORDER BY j.created_at DESC");
        data_query.push_str(&format!(" LIMIT {limit} OFFSET {offset}"));

        let mut data_sql = sqlx::query_as::<_, JobWithCompany>(&data_query);
        for param in params {
            data_sql = data_sql.bind(param);
        }
        let jobs = data_sql.fetch_all(db).await?;

        Ok(PaginatedJobsResponse {
            data: jobs,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    pub async fn get(db: &PgPool, job_id: Uuid) -> Result<JobWithCompany, AppError> {
        let job = sqlx::query_as::<_, JobWithCompany>(&format!(
            "SELECT {JOB_WITH_COMPANY_COLUMNS} FROM jobs j
             JOIN companies c ON c.id = j.company_id
             WHERE j.id = $1"
        ))
        .bind(job_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Job not found"))?;

        Ok(job)
    }

    async fn fetch(db: &PgPool, job_id: Uuid) -> Result<Job, AppError> {
        let job =
            sqlx::query_as::<_, Job>(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
                .bind(job_id)
                .fetch_optional(db)
                .await?
                .ok_or_else(|| AppError::not_found("Job not found"))?;

        Ok(job)
    }

    #[instrument(skip(db, identity, dto), fields(job_id = %job_id))]
    pub async fn update(
        db: &PgPool,
        identity: &Identity,
        job_id: Uuid,
        dto: UpdateJobRequest,
    ) -> Result<Job, AppError> {
        let job = Self::fetch(db, job_id).await?;
        Self::ensure_job_owner(db, &job, identity).await?;

        // Validate the range the row will end up with, not just the fields
        // present in the request.
        let salary_min = dto.salary_min.or(job.salary_min);
        let salary_max = dto.salary_max.or(job.salary_max);
        validate_salary_range(salary_min, salary_max)?;

        let updated = sqlx::query_as::<_, Job>(&format!(
            "UPDATE jobs SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                location = COALESCE($4, location),
                employment_type = COALESCE($5, employment_type),
                salary_min = COALESCE($6, salary_min),
                salary_max = COALESCE($7, salary_max),
                required_skills = COALESCE($8, required_skills),
                status = COALESCE($9, status)
             WHERE id = $1
             RETURNING {JOB_COLUMNS}"
        ))
        .bind(job_id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.location)
        .bind(dto.employment_type)
        .bind(dto.salary_min)
        .bind(dto.salary_max)
        .bind(&dto.required_skills)
        .bind(dto.status)
        .fetch_one(db)
        .await?;

        Ok(updated)
    }

    #[instrument(skip(db, identity), fields(job_id = %job_id))]
    pub async fn delete(db: &PgPool, identity: &Identity, job_id: Uuid) -> Result<(), AppError> {
        let job = Self::fetch(db, job_id).await?;
        Self::ensure_job_owner(db, &job, identity).await?;

        sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(job_id)
            .execute(db)
            .await?;

        info!(job_id = %job_id, "job deleted");

        Ok(())
    }

    /// Job mutations are gated on owning the company the job belongs to.
    async fn ensure_job_owner(
        db: &PgPool,
        job: &Job,
        identity: &Identity,
    ) -> Result<(), AppError> {
        if identity.role == UserRole::Admin {
            return Ok(());
        }

        let owner_id =
            sqlx::query_scalar::<_, Uuid>("SELECT owner_id FROM companies WHERE id = $1")
                .bind(job.company_id)
                .fetch_one(db)
                .await?;

        if owner_id != identity.id {
            return Err(AppError::forbidden("Not authorized to modify this job"));
        }

        Ok(())
    }
}

fn validate_salary_range(salary_min: Option<i32>, salary_max: Option<i32>) -> Result<(), AppError> {
    if let (Some(min), Some(max)) = (salary_min, salary_max)
        && min > max
    {
        return Err(AppError::bad_request(
            "salary_min cannot be greater than salary_max",
        ));
    }
    Ok(())
}
