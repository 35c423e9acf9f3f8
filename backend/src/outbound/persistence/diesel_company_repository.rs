//! PostgreSQL-backed `CompanyRepository`.
//!
//! Uniqueness of the tax id and the "no drivers left" rule on delete are
//! enforced by `companies_tax_id_key` and `drivers_company_id_fkey`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{CompanyRepository, CompanyRepositoryError};
use crate::domain::{Company, CompanyId};

use super::diesel_error_mapping::DbFailure;
use super::models::{CompanyRow, CompanyWrite};
use super::pool::DbPool;
use super::schema::companies;

const TAX_ID_CONSTRAINT: &str = "companies_tax_id_key";
const DRIVERS_FK: &str = "drivers_company_id_fkey";

/// Diesel implementation of [`CompanyRepository`].
#[derive(Clone)]
pub struct DieselCompanyRepository {
    pool: DbPool,
}

impl DieselCompanyRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: DbFailure) -> CompanyRepositoryError {
    match failure {
        DbFailure::Connection(message) => CompanyRepositoryError::connection(message),
        other => CompanyRepositoryError::query(other.into_query_message()),
    }
}

fn write_failure(failure: DbFailure, company: &Company) -> CompanyRepositoryError {
    if failure.violates_unique(TAX_ID_CONSTRAINT) {
        return CompanyRepositoryError::duplicate_tax_id(company.tax_id.as_ref());
    }
    map_failure(failure)
}

fn into_company(row: CompanyRow) -> Result<Company, CompanyRepositoryError> {
    let id = row.id;
    Company::try_from(row).map_err(|message| {
        warn!(company_id = %id, %message, "stored company row failed validation");
        CompanyRepositoryError::query(message)
    })
}

#[async_trait]
impl CompanyRepository for DieselCompanyRepository {
    async fn list(&self) -> Result<Vec<Company>, CompanyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(|err| map_failure(err.into()))?;
        let rows: Vec<CompanyRow> = companies::table
            .select(CompanyRow::as_select())
            .order_by((companies::name.asc(), companies::id.asc()))
            .load(&mut conn)
            .await
            .map_err(|err| map_failure(err.into()))?;
        rows.into_iter().map(into_company).collect()
    }

    async fn find_by_id(&self, id: &CompanyId) -> Result<Option<Company>, CompanyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(|err| map_failure(err.into()))?;
        let row = companies::table
            .find(*id.as_uuid())
            .select(CompanyRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_failure(err.into()))?;
        row.map(into_company).transpose()
    }

    async fn insert(&self, company: &Company) -> Result<(), CompanyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(|err| map_failure(err.into()))?;
        diesel::insert_into(companies::table)
            .values(CompanyWrite::from(company))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| write_failure(err.into(), company))
    }

    async fn update(&self, company: &Company) -> Result<bool, CompanyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(|err| map_failure(err.into()))?;
        let changes = CompanyWrite::from(company);
        let updated = diesel::update(companies::table.find(*company.id.as_uuid()))
            .set((&changes, companies::updated_at.eq(diesel::dsl::now)))
            .execute(&mut conn)
            .await
            .map_err(|err| write_failure(err.into(), company))?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &CompanyId) -> Result<bool, CompanyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(|err| map_failure(err.into()))?;
        let deleted = diesel::delete(companies::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(|err| {
                let failure = DbFailure::from(err);
                if failure.violates_foreign_key(DRIVERS_FK) {
                    CompanyRepositoryError::has_drivers(id.to_string())
                } else {
                    map_failure(failure)
                }
            })?;
        Ok(deleted > 0)
    }
}
