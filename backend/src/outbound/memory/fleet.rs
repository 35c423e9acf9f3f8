//! In-memory company and driver repositories over a shared store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::ports::{
    CompanyRepository, CompanyRepositoryError, DriverRepository, DriverRepositoryError,
};
use crate::domain::{Company, CompanyId, Driver, DriverId};

use super::{read, write};

#[derive(Debug, Default)]
struct FleetStore {
    companies: HashMap<CompanyId, Company>,
    drivers: HashMap<DriverId, Driver>,
}

impl FleetStore {
    fn tax_id_taken(&self, company: &Company) -> bool {
        self.companies
            .values()
            .any(|other| other.tax_id == company.tax_id && other.id != company.id)
    }

    fn license_taken(&self, driver: &Driver) -> bool {
        self.drivers
            .values()
            .any(|other| other.license == driver.license && other.id != driver.id)
    }

    fn check_driver(&self, driver: &Driver) -> Result<(), DriverRepositoryError> {
        if self.license_taken(driver) {
            return Err(DriverRepositoryError::duplicate_license(
                driver.license.as_ref(),
            ));
        }
        if !self.companies.contains_key(&driver.company_id) {
            return Err(DriverRepositoryError::company_not_found(
                driver.company_id.to_string(),
            ));
        }
        Ok(())
    }
}

fn sorted_by_name<T>(mut items: Vec<T>, key: impl Fn(&T) -> (String, String)) -> Vec<T> {
    items.sort_by_cached_key(key);
    items
}

/// Companies with tax id uniqueness and delete protection.
#[derive(Debug, Default)]
pub struct InMemoryCompanyRepository {
    store: Arc<RwLock<FleetStore>>,
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn list(&self) -> Result<Vec<Company>, CompanyRepositoryError> {
        let companies = read(&self.store).companies.values().cloned().collect();
        Ok(sorted_by_name(companies, |company| {
            (company.name.to_string(), company.id.to_string())
        }))
    }

    async fn find_by_id(&self, id: &CompanyId) -> Result<Option<Company>, CompanyRepositoryError> {
        Ok(read(&self.store).companies.get(id).cloned())
    }

    async fn insert(&self, company: &Company) -> Result<(), CompanyRepositoryError> {
        let mut store = write(&self.store);
        if store.tax_id_taken(company) {
            return Err(CompanyRepositoryError::duplicate_tax_id(
                company.tax_id.as_ref(),
            ));
        }
        if store.companies.contains_key(&company.id) {
            return Err(CompanyRepositoryError::query(format!(
                "company {} already exists",
                company.id
            )));
        }
        store.companies.insert(company.id, company.clone());
        Ok(())
    }

    async fn update(&self, company: &Company) -> Result<bool, CompanyRepositoryError> {
        let mut store = write(&self.store);
        if !store.companies.contains_key(&company.id) {
            return Ok(false);
        }
        if store.tax_id_taken(company) {
            return Err(CompanyRepositoryError::duplicate_tax_id(
                company.tax_id.as_ref(),
            ));
        }
        store.companies.insert(company.id, company.clone());
        Ok(true)
    }

    async fn delete(&self, id: &CompanyId) -> Result<bool, CompanyRepositoryError> {
        let mut store = write(&self.store);
        if store.drivers.values().any(|driver| driver.company_id == *id) {
            return Err(CompanyRepositoryError::has_drivers(id.to_string()));
        }
        Ok(store.companies.remove(id).is_some())
    }
}

/// Drivers sharing the company store so the company reference is enforced.
#[derive(Debug)]
pub struct InMemoryDriverRepository {
    store: Arc<RwLock<FleetStore>>,
}

impl InMemoryDriverRepository {
    /// Attach to the store behind `companies`.
    #[must_use]
    pub fn new(companies: Arc<InMemoryCompanyRepository>) -> Self {
        Self {
            store: Arc::clone(&companies.store),
        }
    }
}

#[async_trait]
impl DriverRepository for InMemoryDriverRepository {
    async fn list(&self) -> Result<Vec<Driver>, DriverRepositoryError> {
        let drivers = read(&self.store).drivers.values().cloned().collect();
        Ok(sorted_by_name(drivers, |driver| {
            (driver.name.to_string(), driver.id.to_string())
        }))
    }

    async fn find_by_id(&self, id: &DriverId) -> Result<Option<Driver>, DriverRepositoryError> {
        Ok(read(&self.store).drivers.get(id).cloned())
    }

    async fn insert(&self, driver: &Driver) -> Result<(), DriverRepositoryError> {
        let mut store = write(&self.store);
        store.check_driver(driver)?;
        if store.drivers.contains_key(&driver.id) {
            return Err(DriverRepositoryError::query(format!(
                "driver {} already exists",
                driver.id
            )));
        }
        store.drivers.insert(driver.id, driver.clone());
        Ok(())
    }

    async fn update(&self, driver: &Driver) -> Result<bool, DriverRepositoryError> {
        let mut store = write(&self.store);
        if !store.drivers.contains_key(&driver.id) {
            return Ok(false);
        }
        store.check_driver(driver)?;
        store.drivers.insert(driver.id, driver.clone());
        Ok(true)
    }

    async fn delete(&self, id: &DriverId) -> Result<bool, DriverRepositoryError> {
        Ok(write(&self.store).drivers.remove(id).is_some())
    }
}
