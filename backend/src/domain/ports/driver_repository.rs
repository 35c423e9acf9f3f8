//! Port for driver persistence.

use async_trait::async_trait;

use crate::domain::{Driver, DriverId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by driver repository adapters.
    pub enum DriverRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "driver repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "driver repository query failed: {message}",
        /// Another driver already holds the licence number.
        DuplicateLicense { license: String } => "license number already registered: {license}",
        /// The referenced company does not exist.
        CompanyNotFound { company_id: String } => "company not found: {company_id}",
    }
}

/// Storage for drivers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DriverRepository: Send + Sync {
    /// All drivers ordered by name.
    async fn list(&self) -> Result<Vec<Driver>, DriverRepositoryError>;

    /// Fetch a driver by identifier.
    async fn find_by_id(&self, id: &DriverId) -> Result<Option<Driver>, DriverRepositoryError>;

    /// Insert a new driver.
    async fn insert(&self, driver: &Driver) -> Result<(), DriverRepositoryError>;

    /// Overwrite an existing driver, returning `false` when it does not exist.
    async fn update(&self, driver: &Driver) -> Result<bool, DriverRepositoryError>;

    /// Delete a driver, returning `false` when it does not exist.
    async fn delete(&self, id: &DriverId) -> Result<bool, DriverRepositoryError>;
}
