//! Driver domain service implementing [`DriverCommand`] and [`DriverQuery`].
//!
//! Drivers reference a company. The service checks the reference up front so
//! callers get a field-level error, and still maps the repository's foreign-key
//! failure for the race where a company disappears between check and write.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::company_service::map_company_error;
use crate::domain::ports::{
    CompanyRepository, DriverCommand, DriverQuery, DriverRepository, DriverRepositoryError,
};
use crate::domain::{CompanyId, Driver, DriverDraft, DriverId, DriverPatch, Error};

/// Driver service backed by driver and company repositories.
#[derive(Clone)]
pub struct DriverService<D, C> {
    drivers: Arc<D>,
    companies: Arc<C>,
}

impl<D, C> DriverService<D, C> {
    /// Create a new service with the given repositories.
    pub fn new(drivers: Arc<D>, companies: Arc<C>) -> Self {
        Self { drivers, companies }
    }
}

fn unknown_company() -> Error {
    Error::invalid_field("companyId", "unknown_company", "company does not exist")
}

fn driver_not_found(id: &DriverId) -> Error {
    Error::not_found(format!("driver {id} not found"))
}

fn map_driver_error(error: DriverRepositoryError) -> Error {
    match error {
        DriverRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("driver repository unavailable: {message}"))
        }
        DriverRepositoryError::Query { message } => {
            Error::internal(format!("driver repository error: {message}"))
        }
        DriverRepositoryError::DuplicateLicense { .. } => Error::conflicting_field(
            "licenseNumber",
            "duplicate_license_number",
            "license number is already registered",
        ),
        DriverRepositoryError::CompanyNotFound { .. } => unknown_company(),
    }
}

impl<D, C> DriverService<D, C>
where
    D: DriverRepository,
    C: CompanyRepository,
{
    async fn ensure_company(&self, id: &CompanyId) -> Result<(), Error> {
        let company = self
            .companies
            .find_by_id(id)
            .await
            .map_err(map_company_error)?;
        company.map(|_| ()).ok_or_else(unknown_company)
    }

    async fn fetch(&self, id: &DriverId) -> Result<Driver, Error> {
        self.drivers
            .find_by_id(id)
            .await
            .map_err(map_driver_error)?
            .ok_or_else(|| driver_not_found(id))
    }

    async fn store(&self, driver: Driver) -> Result<Driver, Error> {
        let updated = self
            .drivers
            .update(&driver)
            .await
            .map_err(map_driver_error)?;
        if updated {
            Ok(driver)
        } else {
            Err(driver_not_found(&driver.id))
        }
    }
}

#[async_trait]
impl<D, C> DriverQuery for DriverService<D, C>
where
    D: DriverRepository,
    C: CompanyRepository,
{
    async fn list_drivers(&self) -> Result<Vec<Driver>, Error> {
        self.drivers.list().await.map_err(map_driver_error)
    }

    async fn get_driver(&self, id: &DriverId) -> Result<Driver, Error> {
        self.fetch(id).await
    }
}

#[async_trait]
impl<D, C> DriverCommand for DriverService<D, C>
where
    D: DriverRepository,
    C: CompanyRepository,
{
    async fn create_driver(&self, draft: DriverDraft) -> Result<Driver, Error> {
        self.ensure_company(&draft.company_id).await?;
        let driver = draft.into_driver(DriverId::random());
        self.drivers
            .insert(&driver)
            .await
            .map_err(map_driver_error)?;
        info!(driver_id = %driver.id, company_id = %driver.company_id, "driver created");
        Ok(driver)
    }

    async fn replace_driver(&self, id: &DriverId, draft: DriverDraft) -> Result<Driver, Error> {
        self.ensure_company(&draft.company_id).await?;
        self.store(draft.into_driver(*id)).await
    }

    async fn patch_driver(&self, id: &DriverId, patch: DriverPatch) -> Result<Driver, Error> {
        let current = self.fetch(id).await?;
        if let Some(company_id) = patch.company_id.as_ref() {
            self.ensure_company(company_id).await?;
        }
        self.store(patch.apply(current)).await
    }

    async fn delete_driver(&self, id: &DriverId) -> Result<(), Error> {
        let deleted = self.drivers.delete(id).await.map_err(map_driver_error)?;
        if !deleted {
            return Err(driver_not_found(id));
        }
        info!(driver_id = %id, "driver deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "driver_service_tests.rs"]
mod tests;
