//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CompanyCommand, CompanyQuery, DriverCommand, DriverQuery, LoginService, UserAccounts,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential checks for `POST /login`.
    pub login: Arc<dyn LoginService>,
    /// Registration and the `/users/me` endpoints.
    pub accounts: Arc<dyn UserAccounts>,
    /// Company mutations.
    pub companies: Arc<dyn CompanyCommand>,
    /// Company reads.
    pub companies_query: Arc<dyn CompanyQuery>,
    /// Driver mutations.
    pub drivers: Arc<dyn DriverCommand>,
    /// Driver reads.
    pub drivers_query: Arc<dyn DriverQuery>,
}

impl HttpState {
    /// Build state from services that each implement both halves of their
    /// port pair.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use fleet_backend::domain::{AccountsService, CompanyService, DriverService};
    /// use fleet_backend::inbound::http::state::HttpState;
    /// use fleet_backend::outbound::memory::{
    ///     InMemoryCompanyRepository, InMemoryDriverRepository, InMemoryUserRepository,
    /// };
    /// use fleet_backend::outbound::security::Argon2PasswordHasher;
    ///
    /// let companies = Arc::new(InMemoryCompanyRepository::default());
    /// let drivers = Arc::new(InMemoryDriverRepository::new(companies.clone()));
    /// let state = HttpState::from_services(
    ///     Arc::new(AccountsService::new(
    ///         Arc::new(InMemoryUserRepository::default()),
    ///         Arc::new(Argon2PasswordHasher::new()),
    ///     )),
    ///     Arc::new(CompanyService::new(companies.clone())),
    ///     Arc::new(DriverService::new(drivers, companies)),
    /// );
    /// let _login = state.login.clone();
    /// ```
    pub fn from_services<A, C, D>(accounts: Arc<A>, companies: Arc<C>, drivers: Arc<D>) -> Self
    where
        A: LoginService + UserAccounts + 'static,
        C: CompanyCommand + CompanyQuery + 'static,
        D: DriverCommand + DriverQuery + 'static,
    {
        Self {
            login: accounts.clone(),
            accounts,
            companies: companies.clone(),
            companies_query: companies,
            drivers: drivers.clone(),
            drivers_query: drivers,
        }
    }
}
