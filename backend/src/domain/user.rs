//! User account model.
//!
//! Users authenticate with their email address. The email is normalised on
//! construction by trimming it and lowercasing its domain, so lookups and the
//! uniqueness constraint operate on one canonical spelling.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use uuid::Uuid;

use super::Name;

/// Maximum number of characters accepted for an email address.
pub const EMAIL_MAX: usize = 255;

/// Validation errors for user identifiers and email addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The identifier was blank.
    EmptyId,
    /// The identifier is not a UUID.
    InvalidId,
    /// The email was missing or blank once trimmed.
    EmptyEmail,
    /// The email does not look like `local@domain`.
    InvalidEmail,
    /// The email exceeds [`EMAIL_MAX`] characters.
    EmailTooLong {
        /// Upper bound on the character count.
        max: usize,
    },
}

impl UserValidationError {
    /// Stable machine-readable reason code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyId => "empty_user_id",
            Self::InvalidId => "invalid_user_id",
            Self::EmptyEmail => "empty_email",
            Self::InvalidEmail => "invalid_email",
            Self::EmailTooLong { .. } => "email_too_long",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from its string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID loaded from storage.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address used as the login identity.
///
/// # Examples
/// ```
/// use fleet_backend::domain::Email;
///
/// let email = Email::new(" Ada@Example.COM ").expect("valid email");
/// assert_eq!(email.as_ref(), "Ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validate and normalise an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(UserValidationError::InvalidEmail);
        };
        Ok(Self(format!("{local}@{}", domain.to_lowercase())))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Opaque password hash in PHC string format.
///
/// `Debug` output is redacted so hashes never reach logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a password hasher or loaded from storage.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Application user.
///
/// ## Invariants
/// - `email` is normalised and unique across users.
/// - `name` is non-empty once trimmed.
/// - Superusers are always staff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: Email,
    name: Name,
    is_active: bool,
    is_staff: bool,
    is_superuser: bool,
}

impl User {
    /// Create an active, unprivileged user.
    #[must_use]
    pub const fn new(id: UserId, email: Email, name: Name) -> Self {
        Self {
            id,
            email,
            name,
            is_active: true,
            is_staff: false,
            is_superuser: false,
        }
    }

    /// Create an active superuser whose name defaults to the email.
    pub fn superuser(id: UserId, email: Email) -> Result<Self, super::NameValidationError> {
        let name = Name::new(email.as_ref())?;
        Ok(Self {
            is_staff: true,
            is_superuser: true,
            ..Self::new(id, email, name)
        })
    }

    /// Rebuild a user from persisted state.
    #[must_use]
    pub fn from_parts(id: UserId, email: Email, name: Name, flags: UserFlags) -> Self {
        Self {
            id,
            email,
            name,
            is_active: flags.is_active,
            is_staff: flags.is_staff || flags.is_superuser,
            is_superuser: flags.is_superuser,
        }
    }

    /// Stable user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Normalised login email.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Display name.
    #[must_use]
    pub const fn name(&self) -> &Name {
        &self.name
    }

    /// Account and permission flags.
    #[must_use]
    pub const fn flags(&self) -> UserFlags {
        UserFlags {
            is_active: self.is_active,
            is_staff: self.is_staff,
            is_superuser: self.is_superuser,
        }
    }

    /// Whether the user may authenticate.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Replace the login email.
    pub fn set_email(&mut self, email: Email) {
        self.email = email;
    }

    /// Replace the display name.
    pub fn set_name(&mut self, name: Name) {
        self.name = name;
    }
}

/// Account and permission flags carried by a [`User`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserFlags {
    /// The account may authenticate.
    pub is_active: bool,
    /// The account may use administrative tooling.
    pub is_staff: bool,
    /// The account holds every permission.
    pub is_superuser: bool,
}

impl Default for UserFlags {
    fn default() -> Self {
        Self {
            is_active: true,
            is_staff: false,
            is_superuser: false,
        }
    }
}
