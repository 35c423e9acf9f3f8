//! Company domain service implementing [`CompanyCommand`] and [`CompanyQuery`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    CompanyCommand, CompanyQuery, CompanyRepository, CompanyRepositoryError,
};
use crate::domain::{Company, CompanyDraft, CompanyId, CompanyPatch, Error};

/// Company service backed by a [`CompanyRepository`].
#[derive(Clone)]
pub struct CompanyService<R> {
    companies: Arc<R>,
}

impl<R> CompanyService<R> {
    /// Create a new service with the given repository.
    pub fn new(companies: Arc<R>) -> Self {
        Self { companies }
    }
}

pub(crate) fn map_company_error(error: CompanyRepositoryError) -> Error {
    match error {
        CompanyRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("company repository unavailable: {message}"))
        }
        CompanyRepositoryError::Query { message } => {
            Error::internal(format!("company repository error: {message}"))
        }
        CompanyRepositoryError::DuplicateTaxId { .. } => Error::conflicting_field(
            "taxId",
            "duplicate_tax_id",
            "tax id is already registered",
        ),
        CompanyRepositoryError::HasDrivers { .. } => {
            Error::conflict("company still has drivers").with_details(serde_json::json!({
                "code": "company_has_drivers",
            }))
        }
    }
}

fn company_not_found(id: &CompanyId) -> Error {
    Error::not_found(format!("company {id} not found"))
}

impl<R> CompanyService<R>
where
    R: CompanyRepository,
{
    async fn fetch(&self, id: &CompanyId) -> Result<Company, Error> {
        self.companies
            .find_by_id(id)
            .await
            .map_err(map_company_error)?
            .ok_or_else(|| company_not_found(id))
    }

    async fn store(&self, company: Company) -> Result<Company, Error> {
        let updated = self
            .companies
            .update(&company)
            .await
            .map_err(map_company_error)?;
        if updated {
            Ok(company)
        } else {
            Err(company_not_found(&company.id))
        }
    }
}

#[async_trait]
impl<R> CompanyQuery for CompanyService<R>
where
    R: CompanyRepository,
{
    async fn list_companies(&self) -> Result<Vec<Company>, Error> {
        self.companies.list().await.map_err(map_company_error)
    }

    async fn get_company(&self, id: &CompanyId) -> Result<Company, Error> {
        self.fetch(id).await
    }
}

#[async_trait]
impl<R> CompanyCommand for CompanyService<R>
where
    R: CompanyRepository,
{
    async fn create_company(&self, draft: CompanyDraft) -> Result<Company, Error> {
        let company = draft.into_company(CompanyId::random());
        self.companies
            .insert(&company)
            .await
            .map_err(map_company_error)?;
        info!(company_id = %company.id, "company created");
        Ok(company)
    }

    async fn replace_company(
        &self,
        id: &CompanyId,
        draft: CompanyDraft,
    ) -> Result<Company, Error> {
        self.store(draft.into_company(*id)).await
    }

    async fn patch_company(&self, id: &CompanyId, patch: CompanyPatch) -> Result<Company, Error> {
        let current = self.fetch(id).await?;
        self.store(patch.apply(current)).await
    }

    async fn delete_company(&self, id: &CompanyId) -> Result<(), Error> {
        let deleted = self
            .companies
            .delete(id)
            .await
            .map_err(map_company_error)?;
        if !deleted {
            return Err(company_not_found(id));
        }
        info!(company_id = %id, "company deleted");
        Ok(())
    }
}
