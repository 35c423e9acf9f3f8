//! Builders for HTTP state from the configured persistence adapters.

use std::sync::Arc;

use actix_web::web;

use fleet_backend::domain::ports::{CompanyRepository, DriverRepository, UserRepository};
use fleet_backend::domain::{AccountsService, CompanyService, DriverService};
use fleet_backend::inbound::http::state::HttpState;
use fleet_backend::outbound::memory::{
    InMemoryCompanyRepository, InMemoryDriverRepository, InMemoryUserRepository,
};
use fleet_backend::outbound::persistence::{
    DbPool, DieselCompanyRepository, DieselDriverRepository, DieselUserRepository,
};
use fleet_backend::outbound::security::Argon2PasswordHasher;

use super::ServerConfig;

/// Wire the domain services over one set of repositories.
fn wire<U, C, D>(users: Arc<U>, companies: Arc<C>, drivers: Arc<D>) -> HttpState
where
    U: UserRepository + 'static,
    C: CompanyRepository + 'static,
    D: DriverRepository + 'static,
{
    let hasher = Arc::new(Argon2PasswordHasher::new());
    HttpState::from_services(
        Arc::new(AccountsService::new(users, hasher)),
        Arc::new(CompanyService::new(companies.clone())),
        Arc::new(DriverService::new(drivers, companies)),
    )
}

fn diesel_state(pool: &DbPool) -> HttpState {
    wire(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselCompanyRepository::new(pool.clone())),
        Arc::new(DieselDriverRepository::new(pool.clone())),
    )
}

fn memory_state() -> HttpState {
    let companies = Arc::new(InMemoryCompanyRepository::default());
    let drivers = Arc::new(InMemoryDriverRepository::new(companies.clone()));
    wire(
        Arc::new(InMemoryUserRepository::default()),
        companies,
        drivers,
    )
}

/// Build the handler state, preferring PostgreSQL when a pool is configured.
pub fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => diesel_state(pool),
        None => {
            tracing::warn!("no database configured; data lives in memory only");
            memory_state()
        }
    };
    web::Data::new(state)
}
