//! Company aggregate and its write payloads.

use std::fmt;

use uuid::Uuid;

use super::{Name, TaxId};

/// Stable company identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompanyId(Uuid);

impl CompanyId {
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

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registered company.
///
/// ## Invariants
/// - `tax_id` passed check-digit validation and is unique across companies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    /// Stable identifier.
    pub id: CompanyId,
    /// Legal or trading name.
    pub name: Name,
    /// Validated tax identifier.
    pub tax_id: TaxId,
}

/// Complete set of attributes for creating or replacing a company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyDraft {
    /// Legal or trading name.
    pub name: Name,
    /// Validated tax identifier.
    pub tax_id: TaxId,
}

impl CompanyDraft {
    /// Materialise the draft under the given identifier.
    #[must_use]
    pub fn into_company(self, id: CompanyId) -> Company {
        Company {
            id,
            name: self.name,
            tax_id: self.tax_id,
        }
    }
}

/// Partial update; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyPatch {
    /// Replacement name.
    pub name: Option<Name>,
    /// Replacement tax identifier.
    pub tax_id: Option<TaxId>,
}

impl CompanyPatch {
    /// Apply the patch on top of an existing company.
    #[must_use]
    pub fn apply(self, mut company: Company) -> Company {
        if let Some(name) = self.name {
            company.name = name;
        }
        if let Some(tax_id) = self.tax_id {
            company.tax_id = tax_id;
        }
        company
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn company() -> Company {
        Company {
            id: CompanyId::random(),
            name: Name::new("Acme Transportes").expect("name"),
            tax_id: TaxId::parse("99.750.592/0001-26").expect("tax id"),
        }
    }

    #[rstest]
    fn empty_patch_keeps_company(company: Company) {
        let patched = CompanyPatch::default().apply(company.clone());
        assert_eq!(patched, company);
    }

    #[rstest]
    fn patch_replaces_only_supplied_fields(company: Company) {
        let patch = CompanyPatch {
            name: None,
            tax_id: Some(TaxId::parse("18754544000104").expect("tax id")),
        };
        let patched = patch.apply(company.clone());
        assert_eq!(patched.name, company.name);
        assert_eq!(patched.tax_id.as_ref(), "18754544000104");
        assert_eq!(patched.id, company.id);
    }
}
