//! PostgreSQL persistence adapters built on Diesel.
//!
//! Repositories only translate between row structs and domain aggregates;
//! uniqueness and referential rules live in the schema constraints and are
//! mapped back to the matching port error variants.
//!
//! ```no_run
//! use fleet_backend::outbound::persistence::{DbPool, DieselCompanyRepository, PoolConfig};
//!
//! # async fn build() -> Result<(), fleet_backend::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://fleet@localhost/fleet")).await?;
//! let companies = DieselCompanyRepository::new(pool);
//! # let _ = companies;
//! # Ok(())
//! # }
//! ```

mod diesel_company_repository;
mod diesel_driver_repository;
mod diesel_error_mapping;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_company_repository::DieselCompanyRepository;
pub use diesel_driver_repository::DieselDriverRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
