//! Driving port for reading drivers.

use async_trait::async_trait;

use crate::domain::{Driver, DriverId, Error};

/// Read-side use cases for drivers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DriverQuery: Send + Sync {
    /// All drivers ordered by name.
    async fn list_drivers(&self) -> Result<Vec<Driver>, Error>;

    /// A single driver, or a not-found error.
    async fn get_driver(&self, id: &DriverId) -> Result<Driver, Error>;
}
