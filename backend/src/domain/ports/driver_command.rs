//! Driving port for driver mutations.

use async_trait::async_trait;

use crate::domain::{Driver, DriverDraft, DriverId, DriverPatch, Error};

/// Write-side use cases for drivers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DriverCommand: Send + Sync {
    /// Register a driver for an existing company.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error naming `companyId` when the company
    /// does not exist, and a conflict when the licence number is taken.
    async fn create_driver(&self, draft: DriverDraft) -> Result<Driver, Error>;

    /// Replace every attribute of an existing driver.
    async fn replace_driver(&self, id: &DriverId, draft: DriverDraft) -> Result<Driver, Error>;

    /// Change only the supplied attributes of an existing driver.
    async fn patch_driver(&self, id: &DriverId, patch: DriverPatch) -> Result<Driver, Error>;

    /// Remove a driver.
    async fn delete_driver(&self, id: &DriverId) -> Result<(), Error>;
}
