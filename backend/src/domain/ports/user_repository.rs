//! Port abstraction for user account persistence and its errors.

use async_trait::async_trait;

use crate::domain::{Email, PasswordHash, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses the email address.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// A user together with the stored password hash.
///
/// Only authentication and persistence code should see this type; everything
/// user-facing works with [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Account data.
    pub user: User,
    /// Encoded password hash.
    pub password_hash: PasswordHash,
}

/// Storage for user accounts keyed by id and by normalised email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// Fails with [`UserPersistenceError::DuplicateEmail`] when the email is
    /// already taken.
    async fn insert(&self, record: &UserRecord) -> Result<(), UserPersistenceError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, UserPersistenceError>;

    /// Fetch an account by normalised email.
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserRecord>, UserPersistenceError>;

    /// Overwrite an existing account, returning `false` when it does not exist.
    async fn update(&self, record: &UserRecord) -> Result<bool, UserPersistenceError>;
}
