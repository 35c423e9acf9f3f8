//! Port for company persistence.

use async_trait::async_trait;

use crate::domain::{Company, CompanyId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by company repository adapters.
    pub enum CompanyRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "company repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "company repository query failed: {message}",
        /// Another company already holds the tax identifier.
        DuplicateTaxId { tax_id: String } => "tax id already registered: {tax_id}",
        /// Drivers still reference the company.
        HasDrivers { company_id: String } => "company {company_id} still has drivers",
    }
}

/// Storage for companies.
///
/// Adapters enforce tax identifier uniqueness and refuse to delete companies
/// that drivers still reference.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// All companies ordered by name.
    async fn list(&self) -> Result<Vec<Company>, CompanyRepositoryError>;

    /// Fetch a company by identifier.
    async fn find_by_id(&self, id: &CompanyId) -> Result<Option<Company>, CompanyRepositoryError>;

    /// Insert a new company.
    async fn insert(&self, company: &Company) -> Result<(), CompanyRepositoryError>;

    /// Overwrite an existing company, returning `false` when it does not exist.
    async fn update(&self, company: &Company) -> Result<bool, CompanyRepositoryError>;

    /// Delete a company, returning `false` when it does not exist.
    async fn delete(&self, id: &CompanyId) -> Result<bool, CompanyRepositoryError>;
}
