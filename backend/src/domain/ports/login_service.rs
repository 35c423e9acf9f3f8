//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call this port to authenticate credentials without
//! importing the backing infrastructure, so handler tests can swap in a mock.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    ///
    /// Unknown emails, wrong passwords, and inactive accounts all fail with the
    /// same unauthorised error.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}
