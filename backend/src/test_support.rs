//! Fixtures shared by integration tests (enabled by `test-support`).

use std::sync::Arc;

use crate::domain::ports::FixturePasswordHasher;
use crate::domain::{AccountsService, CompanyService, DriverService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{
    InMemoryCompanyRepository, InMemoryDriverRepository, InMemoryUserRepository,
};

/// Handler state over fresh in-memory repositories.
///
/// Passwords go through [`FixturePasswordHasher`] so tests avoid the Argon2
/// work factor.
#[must_use]
pub fn memory_http_state() -> HttpState {
    let companies = Arc::new(InMemoryCompanyRepository::default());
    let drivers = Arc::new(InMemoryDriverRepository::new(companies.clone()));
    HttpState::from_services(
        Arc::new(AccountsService::new(
            Arc::new(InMemoryUserRepository::default()),
            Arc::new(FixturePasswordHasher),
        )),
        Arc::new(CompanyService::new(companies.clone())),
        Arc::new(DriverService::new(drivers, companies)),
    )
}
