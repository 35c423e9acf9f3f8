//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`]) are implemented by
//! outbound adapters. Driving ports (`LoginService`, `UserAccounts`, the
//! company and driver commands and queries) are implemented by domain
//! services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod company_command;
mod company_query;
mod company_repository;
mod driver_command;
mod driver_query;
mod driver_repository;
mod login_service;
mod password_hasher;
mod user_accounts;
mod user_repository;

#[cfg(test)]
pub use company_command::MockCompanyCommand;
pub use company_command::CompanyCommand;
#[cfg(test)]
pub use company_query::MockCompanyQuery;
pub use company_query::CompanyQuery;
#[cfg(test)]
pub use company_repository::MockCompanyRepository;
pub use company_repository::{CompanyRepository, CompanyRepositoryError};
#[cfg(test)]
pub use driver_command::MockDriverCommand;
pub use driver_command::DriverCommand;
#[cfg(test)]
pub use driver_query::MockDriverQuery;
pub use driver_query::DriverQuery;
#[cfg(test)]
pub use driver_repository::MockDriverRepository;
pub use driver_repository::{DriverRepository, DriverRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(any(test, feature = "test-support"))]
pub use password_hasher::FixturePasswordHasher;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use user_accounts::MockUserAccounts;
pub use user_accounts::UserAccounts;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRecord, UserRepository};
