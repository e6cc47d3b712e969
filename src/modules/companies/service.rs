use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::modules::users::model::{Identity, UserRole};
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

use super::model::{
    Company, CompanyFilterParams, CreateCompanyRequest, PaginatedCompaniesResponse,
    UpdateCompanyRequest,
};

const COMPANY_COLUMNS: &str = "id, name, description, owner_id, created_at";

pub struct CompanyService;

impl CompanyService {
    #[instrument(skip(db, dto), fields(owner_id = %owner_id))]
    pub async fn create(
        db: &PgPool,
        owner_id: Uuid,
        dto: CreateCompanyRequest,
    ) -> Result<Company, AppError> {
        let company = sqlx::query_as::<_, Company>(&format!(
            "INSERT INTO companies (name, description, owner_id)
             VALUES ($1, $2, $3)
             RETURNING {COMPANY_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(owner_id)
        .fetch_one(db)
        .await?;

        info!(company_id = %company.id, "company created");

        Ok(company)
    }

    #[instrument(skip(db, filters))]
    pub async fn list(
        db: &PgPool,
        filters: CompanyFilterParams,
    ) -> Result<PaginatedCompaniesResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut where_clause = String::new();
        let mut params = Vec::new();

        if let Some(search) = &filters.search {
            params.push(format!("%{search}%"));
            where_clause.push_str(&format!(" AND name ILIKE ${}", params.len()));
        }

        let mut count_query = String::from("SELECT COUNT(*) FROM companies WHERE 1=1");
        count_query.push_str(&where_clause);

        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await?;

        let mut data_query = format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE 1=1");
        data_query.push_str(&where_clause);
        data_query.push_str(" ORDER BY created_at DESC");
        data_query.push_str(&format!(" LIMIT {limit} OFFSET {offset}"));

        let mut data_sql = sqlx::query_as::<_, Company>(&data_query);
        for param in params {
            data_sql = data_sql.bind(param);
        }
        let companies = data_sql.fetch_all(db).await?;

        Ok(PaginatedCompaniesResponse {
            data: companies,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    pub async fn get(db: &PgPool, company_id: Uuid) -> Result<Company, AppError> {
        let company = sqlx::query_as::<_, Company>(&format!(
            "SELECT {COMPANY_COLUMNS} FROM companies WHERE id = $1"
        ))
        .bind(company_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Company not found"))?;

        Ok(company)
    }

    pub async fn list_mine(db: &PgPool, owner_id: Uuid) -> Result<Vec<Company>, AppError> {
        let companies = sqlx::query_as::<_, Company>(&format!(
            "SELECT {COMPANY_COLUMNS} FROM companies
             WHERE owner_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(db)
        .await?;

        Ok(companies)
    }

    #[instrument(skip(db, identity, dto), fields(company_id = %company_id))]
    pub async fn update(
        db: &PgPool,
        identity: &Identity,
        company_id: Uuid,
        dto: UpdateCompanyRequest,
    ) -> Result<Company, AppError> {
        let company = Self::get(db, company_id).await?;
        ensure_owner_or_admin(&company, identity)?;

        let updated = sqlx::query_as::<_, Company>(&format!(
            "UPDATE companies SET
                name = COALESCE($2, name),
                description = COALESCE($3, description)
             WHERE id = $1
             RETURNING {COMPANY_COLUMNS}"
        ))
        .bind(company_id)
        .bind(&dto.name)
        .bind(&dto.description)
        .fetch_one(db)
        .await?;

        Ok(updated)
    }

    /// Deletes a company and, through cascades, all of its jobs and their
    /// applications.
    #[instrument(skip(db, identity), fields(company_id = %company_id))]
    pub async fn delete(
        db: &PgPool,
        identity: &Identity,
        company_id: Uuid,
    ) -> Result<(), AppError> {
        let company = Self::get(db, company_id).await?;
        ensure_owner_or_admin(&company, identity)?;

        sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(company_id)
            .execute(db)
            .await?;

        info!(company_id = %company_id, "company deleted");

        Ok(())
    }
}

fn ensure_owner_or_admin(company: &Company, identity: &Identity) -> Result<(), AppError> {
    if identity.role == UserRole::Admin || company.owner_id == identity.id {
        Ok(())
    } else {
        Err(AppError::forbidden("Not authorized to modify this company"))
    }
}
