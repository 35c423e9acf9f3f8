//! Authentication primitives: login credentials, passwords, and account
//! registration payloads.
//!
//! Handlers build these from raw request strings so that services only ever
//! see validated values.

use std::fmt;

use zeroize::Zeroizing;

use super::{Email, Name};

/// Minimum number of characters accepted for a new password.
pub const PASSWORD_MIN: usize = 8;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed and non-empty. It is not shape-checked so that a
///   malformed address fails as "invalid credentials" rather than leaking
///   validation detail.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use fleet_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada@example.com ", "s3cret-pass")
///     .expect("valid credentials");
/// assert_eq!(creds.email(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email as supplied by the caller, trimmed.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validation errors for new passwords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordValidationError {
    /// Password was empty.
    Empty,
    /// Password is shorter than [`PASSWORD_MIN`] characters.
    TooShort {
        /// Lower bound on the character count.
        min: usize,
    },
}

impl PasswordValidationError {
    /// Stable machine-readable reason code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Empty => "empty_password",
            Self::TooShort { .. } => "password_too_short",
        }
    }
}

impl fmt::Display for PasswordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "password must not be empty"),
            Self::TooShort { min } => write!(f, "password must be at least {min} characters"),
        }
    }
}

impl std::error::Error for PasswordValidationError {}

/// Plain-text password chosen by a user, wiped from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct PlainPassword(Zeroizing<String>);

impl PlainPassword {
    /// Validate a new password.
    pub fn new(raw: &str) -> Result<Self, PasswordValidationError> {
        if raw.is_empty() {
            return Err(PasswordValidationError::Empty);
        }
        if raw.chars().count() < PASSWORD_MIN {
            return Err(PasswordValidationError::TooShort { min: PASSWORD_MIN });
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Borrow the secret for hashing.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlainPassword(<redacted>)")
    }
}

/// Validated payload for creating a user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRegistration {
    /// Normalised login email.
    pub email: Email,
    /// Display name.
    pub name: Name,
    /// Password to hash and store.
    pub password: PlainPassword,
}

/// Validated changes to the authenticated user's profile.
///
/// `None` leaves the corresponding attribute untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// Replacement login email.
    pub email: Option<Email>,
    /// Replacement display name.
    pub name: Option<Name>,
    /// Replacement password.
    pub password: Option<PlainPassword>,
}

impl ProfileUpdate {
    /// Whether the update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none() && self.password.is_none()
    }
}
