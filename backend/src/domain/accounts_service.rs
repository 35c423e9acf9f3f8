//! Account domain service.
//!
//! Implements the [`LoginService`] and [`UserAccounts`] driving ports on top of
//! a [`UserRepository`] and a [`PasswordHasher`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, UserAccounts, UserPersistenceError,
    UserRecord, UserRepository,
};
use crate::domain::{
    Email, Error, LoginCredentials, PlainPassword, ProfileUpdate, User, UserId, UserRegistration,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Account service implementing the authentication and profile ports.
#[derive(Clone)]
pub struct AccountsService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> AccountsService<R, H> {
    /// Create a new service with the given repository and hasher.
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<R, H> AccountsService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    fn map_persistence_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateEmail { .. } => Error::conflicting_field(
                "email",
                "duplicate_email",
                "email is already registered",
            ),
        }
    }

    fn map_hash_error(error: PasswordHashError) -> Error {
        Error::internal(format!("password hashing failed: {error}"))
    }

    async fn load(&self, user_id: &UserId) -> Result<Option<UserRecord>, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(Self::map_persistence_error)
    }

    async fn store_new(&self, user: User, password: &PlainPassword) -> Result<User, Error> {
        let password_hash = self.hasher.hash(password).map_err(Self::map_hash_error)?;
        let record = UserRecord {
            user,
            password_hash,
        };
        self.users
            .insert(&record)
            .await
            .map_err(Self::map_persistence_error)?;
        info!(user_id = %record.user.id(), "user account created");
        Ok(record.user)
    }

    async fn ensure_email_free(&self, email: &Email, owner: &UserId) -> Result<(), Error> {
        let existing = self
            .users
            .find_by_email(email)
            .await
            .map_err(Self::map_persistence_error)?;
        match existing {
            Some(record) if record.user.id() != owner => {
                Err(Self::map_persistence_error(UserPersistenceError::duplicate_email(
                    email.as_ref(),
                )))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<R, H> LoginService for AccountsService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        // A malformed address can never match a stored account.
        let Ok(email) = Email::new(credentials.email()) else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        let record = self
            .users
            .find_by_email(&email)
            .await
            .map_err(Self::map_persistence_error)?;
        let Some(record) = record else {
            debug!("login rejected: unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &record.password_hash)
            .map_err(Self::map_hash_error)?;
        if !matches || !record.user.is_active() {
            debug!(user_id = %record.user.id(), "login rejected");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(*record.user.id())
    }
}

#[async_trait]
impl<R, H> UserAccounts for AccountsService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: UserRegistration) -> Result<User, Error> {
        let UserRegistration {
            email,
            name,
            password,
        } = registration;
        self.store_new(User::new(UserId::random(), email, name), &password)
            .await
    }

    async fn register_superuser(
        &self,
        email: Email,
        password: PlainPassword,
    ) -> Result<User, Error> {
        let user = User::superuser(UserId::random(), email)
            .map_err(|err| Error::invalid_field("email", err.code(), err.to_string()))?;
        self.store_new(user, &password).await
    }

    async fn current_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.load(user_id)
            .await?
            .map(|record| record.user)
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    async fn update_profile(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
    ) -> Result<User, Error> {
        let Some(mut record) = self.load(user_id).await? else {
            return Err(Error::unauthorized("login required"));
        };
        if update.is_empty() {
            return Ok(record.user);
        }

        let ProfileUpdate {
            email,
            name,
            password,
        } = update;
        if let Some(email) = email {
            if email != *record.user.email() {
                self.ensure_email_free(&email, user_id).await?;
            }
            record.user.set_email(email);
        }
        if let Some(name) = name {
            record.user.set_name(name);
        }
        if let Some(password) = password {
            record.password_hash = self.hasher.hash(&password).map_err(Self::map_hash_error)?;
        }

        let updated = self
            .users
            .update(&record)
            .await
            .map_err(Self::map_persistence_error)?;
        if !updated {
            return Err(Error::unauthorized("login required"));
        }
        Ok(record.user)
    }
}

#[cfg(test)]
#[path = "accounts_service_tests.rs"]
mod tests;
