//! Driving port for reading companies.

use async_trait::async_trait;

use crate::domain::{Company, CompanyId, Error};

/// Read-side use cases for companies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyQuery: Send + Sync {
    /// All companies ordered by name.
    async fn list_companies(&self) -> Result<Vec<Company>, Error>;

    /// A single company, or a not-found error.
    async fn get_company(&self, id: &CompanyId) -> Result<Company, Error>;
}
