//! Driving port for account registration and self-service profile changes.

use async_trait::async_trait;

use crate::domain::{Email, Error, PlainPassword, ProfileUpdate, User, UserId, UserRegistration};

/// Domain use-case port for user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccounts: Send + Sync {
    /// Create a regular, active account.
    ///
    /// # Errors
    ///
    /// Returns a conflict when the email is already registered.
    async fn register(&self, registration: UserRegistration) -> Result<User, Error>;

    /// Create an active staff superuser whose name is the email.
    async fn register_superuser(&self, email: Email, password: PlainPassword)
    -> Result<User, Error>;

    /// Fetch the account for an authenticated session.
    ///
    /// Fails with unauthorised when the account no longer exists.
    async fn current_user(&self, user_id: &UserId) -> Result<User, Error>;

    /// Apply profile changes to the authenticated account.
    async fn update_profile(&self, user_id: &UserId, update: ProfileUpdate)
    -> Result<User, Error>;
}
