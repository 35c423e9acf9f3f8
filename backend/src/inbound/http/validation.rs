//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request DTOs carry raw strings; these helpers turn them into domain values
//! and turn domain validation failures into field-level [`Error`]s whose
//! details name the JSON field (`{"code": ..., "fields": {"taxId": "..."}}`).

use uuid::Uuid;

use crate::domain::{
    CompanyId, Email, Error, LicenseNumber, Name, PlainPassword, TaxId, UserValidationError,
};

/// Newtype wrapper for JSON field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) const fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const NAME: FieldName = FieldName::new("name");
pub(crate) const EMAIL: FieldName = FieldName::new("email");
pub(crate) const PASSWORD: FieldName = FieldName::new("password");
pub(crate) const TAX_ID: FieldName = FieldName::new("taxId");
pub(crate) const LICENSE_NUMBER: FieldName = FieldName::new("licenseNumber");
pub(crate) const COMPANY_ID: FieldName = FieldName::new("companyId");

fn field_error(field: FieldName, code: &str, message: impl ToString) -> Error {
    Error::invalid_field(field.as_str(), code, message.to_string())
}

/// Unwrap a field that a full replacement must carry.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| {
        let name = field.as_str();
        field_error(field, "missing_field", format!("missing required field: {name}"))
    })
}

pub(crate) fn parse_name(raw: &str, field: FieldName) -> Result<Name, Error> {
    Name::new(raw).map_err(|err| field_error(field, err.code(), err))
}

pub(crate) fn parse_email(raw: &str) -> Result<Email, Error> {
    Email::new(raw).map_err(|err: UserValidationError| field_error(EMAIL, err.code(), &err))
}

pub(crate) fn parse_password(raw: &str) -> Result<PlainPassword, Error> {
    PlainPassword::new(raw).map_err(|err| field_error(PASSWORD, err.code(), err))
}

/// Run the tax id through the check-digit validator.
///
/// Companies always need one, so the "absent" outcome is reported as
/// `empty_tax_id` rather than skipped.
pub(crate) fn parse_tax_id(raw: &str) -> Result<TaxId, Error> {
    TaxId::parse(raw).map_err(|err| field_error(TAX_ID, err.code(), err))
}

pub(crate) fn parse_license_number(raw: &str) -> Result<LicenseNumber, Error> {
    LicenseNumber::new(raw).map_err(|err| field_error(LICENSE_NUMBER, err.code(), err))
}

pub(crate) fn parse_company_id(raw: &str) -> Result<CompanyId, Error> {
    Uuid::parse_str(raw.trim())
        .map(CompanyId::from_uuid)
        .map_err(|_| field_error(COMPANY_ID, "invalid_uuid", "companyId must be a valid UUID"))
}

/// Tax id for a partial update: a missing or blank value leaves it unchanged.
pub(crate) fn parse_patch_tax_id(raw: Option<&str>) -> Result<Option<TaxId>, Error> {
    raw.map(|raw| TaxId::parse_optional(raw).map_err(|err| field_error(TAX_ID, err.code(), err)))
        .transpose()
        .map(Option::flatten)
}

/// Map an optional raw value through `parse`, keeping `None` as "unchanged".
pub(crate) fn parse_optional<T>(
    raw: Option<&str>,
    parse: impl FnOnce(&str) -> Result<T, Error>,
) -> Result<Option<T>, Error> {
    raw.map(parse).transpose()
}
