//! Internal Diesel row structs.
//!
//! Rows never leave the persistence module. Reading a row re-validates its
//! columns through the domain constructors so a corrupted value surfaces as a
//! query error instead of an invalid aggregate.

use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::UserRecord;
use crate::domain::{
    Company, CompanyId, Driver, DriverId, Email, LicenseNumber, Name, PasswordHash, TaxId, User,
    UserFlags, UserId,
};

use super::schema::{companies, drivers, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserWrite<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub name: &'a str,
    pub password_hash: &'a str,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl<'a> From<&'a UserRecord> for UserWrite<'a> {
    fn from(record: &'a UserRecord) -> Self {
        let user = &record.user;
        let flags = user.flags();
        Self {
            id: *user.id().as_uuid(),
            email: user.email().as_ref(),
            name: user.name().as_ref(),
            password_hash: record.password_hash.as_ref(),
            is_active: flags.is_active,
            is_staff: flags.is_staff,
            is_superuser: flags.is_superuser,
        }
    }
}

impl TryFrom<UserRow> for UserRecord {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::new(&row.email).map_err(|err| format!("users.email: {err}"))?;
        let name = Name::new(&row.name).map_err(|err| format!("users.name: {err}"))?;
        let flags = UserFlags {
            is_active: row.is_active,
            is_staff: row.is_staff,
            is_superuser: row.is_superuser,
        };
        Ok(Self {
            user: User::from_parts(UserId::from_uuid(row.id), email, name, flags),
            password_hash: PasswordHash::new(row.password_hash),
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = companies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CompanyRow {
    pub id: Uuid,
    pub name: String,
    pub tax_id: String,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = companies)]
pub(crate) struct CompanyWrite<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub tax_id: &'a str,
}

impl<'a> From<&'a Company> for CompanyWrite<'a> {
    fn from(company: &'a Company) -> Self {
        Self {
            id: *company.id.as_uuid(),
            name: company.name.as_ref(),
            tax_id: company.tax_id.as_ref(),
        }
    }
}

impl TryFrom<CompanyRow> for Company {
    type Error = String;

    fn try_from(row: CompanyRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CompanyId::from_uuid(row.id),
            name: Name::new(&row.name).map_err(|err| format!("companies.name: {err}"))?,
            tax_id: TaxId::parse(&row.tax_id).map_err(|err| format!("companies.tax_id: {err}"))?,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = drivers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DriverRow {
    pub id: Uuid,
    pub name: String,
    pub license_number: String,
    pub company_id: Uuid,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = drivers)]
pub(crate) struct DriverWrite<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub license_number: &'a str,
    pub company_id: Uuid,
}

impl<'a> From<&'a Driver> for DriverWrite<'a> {
    fn from(driver: &'a Driver) -> Self {
        Self {
            id: *driver.id.as_uuid(),
            name: driver.name.as_ref(),
            license_number: driver.license.as_ref(),
            company_id: *driver.company_id.as_uuid(),
        }
    }
}

impl TryFrom<DriverRow> for Driver {
    type Error = String;

    fn try_from(row: DriverRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: DriverId::from_uuid(row.id),
            name: Name::new(&row.name).map_err(|err| format!("drivers.name: {err}"))?,
            license: LicenseNumber::new(&row.license_number)
                .map_err(|err| format!("drivers.license_number: {err}"))?,
            company_id: CompanyId::from_uuid(row.company_id),
        })
    }
}
