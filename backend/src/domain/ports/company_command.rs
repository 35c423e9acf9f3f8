//! Driving port for company mutations.

use async_trait::async_trait;

use crate::domain::{Company, CompanyDraft, CompanyId, CompanyPatch, Error};

/// Write-side use cases for companies.
///
/// Tax identifiers arrive already validated; implementations only enforce
/// uniqueness and referential rules.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyCommand: Send + Sync {
    /// Register a company under a fresh identifier.
    async fn create_company(&self, draft: CompanyDraft) -> Result<Company, Error>;

    /// Replace every attribute of an existing company.
    async fn replace_company(&self, id: &CompanyId, draft: CompanyDraft)
    -> Result<Company, Error>;

    /// Change only the supplied attributes of an existing company.
    async fn patch_company(&self, id: &CompanyId, patch: CompanyPatch) -> Result<Company, Error>;

    /// Remove a company.
    ///
    /// # Errors
    ///
    /// Returns a conflict while drivers still belong to the company.
    async fn delete_company(&self, id: &CompanyId) -> Result<(), Error>;
}
