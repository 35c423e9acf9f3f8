//! Driver aggregate, driving licence numbers, and write payloads.

use std::fmt;

use uuid::Uuid;

use super::{CompanyId, Name};

/// Number of digits in a driving licence number.
pub const LICENSE_NUMBER_LEN: usize = 11;

/// Stable driver identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DriverId(Uuid);

impl DriverId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
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

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors returned by [`LicenseNumber::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseNumberError {
    /// No value supplied.
    Empty,
    /// Not exactly [`LICENSE_NUMBER_LEN`] ASCII digits.
    InvalidFormat,
}

impl LicenseNumberError {
    /// Stable machine-readable reason code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Empty => "empty_license_number",
            Self::InvalidFormat => "invalid_license_number",
        }
    }
}

impl fmt::Display for LicenseNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "license number must not be empty"),
            Self::InvalidFormat => write!(
                f,
                "license number must contain exactly {LICENSE_NUMBER_LEN} digits"
            ),
        }
    }
}

impl std::error::Error for LicenseNumberError {}

/// Driving licence (CNH) number: exactly eleven ASCII digits.
///
/// # Examples
/// ```
/// use fleet_backend::domain::LicenseNumber;
///
/// assert!(LicenseNumber::new(" 97270429357 ").is_ok());
/// assert!(LicenseNumber::new("9727042935").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LicenseNumber(String);

impl LicenseNumber {
    /// Validate a licence number after trimming surrounding whitespace.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, LicenseNumberError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(LicenseNumberError::Empty);
        }
        if trimmed.len() != LICENSE_NUMBER_LEN || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(LicenseNumberError::InvalidFormat);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for LicenseNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for LicenseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Registered driver belonging to a company.
///
/// ## Invariants
/// - `license` is unique across drivers.
/// - `company_id` references an existing company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    /// Stable identifier.
    pub id: DriverId,
    /// Full name.
    pub name: Name,
    /// Driving licence number.
    pub license: LicenseNumber,
    /// Owning company.
    pub company_id: CompanyId,
}

/// Complete set of attributes for creating or replacing a driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverDraft {
    /// Full name.
    pub name: Name,
    /// Driving licence number.
    pub license: LicenseNumber,
    /// Owning company.
    pub company_id: CompanyId,
}

impl DriverDraft {
    /// Materialise the draft under the given identifier.
    #[must_use]
    pub fn into_driver(self, id: DriverId) -> Driver {
        Driver {
            id,
            name: self.name,
            license: self.license,
            company_id: self.company_id,
        }
    }
}

/// Partial update; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverPatch {
    /// Replacement name.
    pub name: Option<Name>,
    /// Replacement licence number.
    pub license: Option<LicenseNumber>,
    /// Replacement owning company.
    pub company_id: Option<CompanyId>,
}

impl DriverPatch {
    /// Apply the patch on top of an existing driver.
    #[must_use]
    pub fn apply(self, mut driver: Driver) -> Driver {
        if let Some(name) = self.name {
            driver.name = name;
        }
        if let Some(license) = self.license {
            driver.license = license;
        }
        if let Some(company_id) = self.company_id {
            driver.company_id = company_id;
        }
        driver
    }
}
