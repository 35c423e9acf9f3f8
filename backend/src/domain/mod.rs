//! Domain primitives, aggregates, ports, and services.
//!
//! Purpose: define the strongly typed fleet model (users, companies, drivers)
//! and the use cases that operate on it, independent of HTTP and storage.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - TaxId: validated company tax identifier with check digits.
//! - User, Company, Driver: aggregates plus their write payloads.
//! - ports: driving and driven port traits.
//! - AccountsService, CompanyService, DriverService: port implementations.

mod accounts_service;
pub mod auth;
pub mod company;
mod company_service;
pub mod driver;
mod driver_service;
pub mod error;
pub mod name;
pub mod ports;
pub mod tax_id;
pub mod trace_id;
pub mod user;

pub use self::accounts_service::AccountsService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN, PasswordValidationError, PlainPassword,
    ProfileUpdate, UserRegistration,
};
pub use self::company::{Company, CompanyDraft, CompanyId, CompanyPatch};
pub use self::company_service::CompanyService;
pub use self::driver::{
    Driver, DriverDraft, DriverId, DriverPatch, LICENSE_NUMBER_LEN, LicenseNumber,
    LicenseNumberError,
};
pub use self::driver_service::DriverService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, field_details};
pub use self::name::{NAME_MAX, Name, NameValidationError};
pub use self::tax_id::{FormatIssue, TAX_ID_LEN, TaxId, TaxIdError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EMAIL_MAX, Email, PasswordHash, User, UserFlags, UserId, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use fleet_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
