//! PostgreSQL-backed `DriverRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{DriverRepository, DriverRepositoryError};
use crate::domain::{Driver, DriverId};

use super::diesel_error_mapping::DbFailure;
use super::models::{DriverRow, DriverWrite};
use super::pool::DbPool;
use super::schema::drivers;

const LICENSE_CONSTRAINT: &str = "drivers_license_number_key";
const COMPANY_FK: &str = "drivers_company_id_fkey";

/// Diesel implementation of [`DriverRepository`].
#[derive(Clone)]
pub struct DieselDriverRepository {
    pool: DbPool,
}

impl DieselDriverRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: DbFailure) -> DriverRepositoryError {
    match failure {
        DbFailure::Connection(message) => DriverRepositoryError::connection(message),
        other => DriverRepositoryError::query(other.into_query_message()),
    }
}

fn write_failure(failure: DbFailure, driver: &Driver) -> DriverRepositoryError {
    if failure.violates_unique(LICENSE_CONSTRAINT) {
        DriverRepositoryError::duplicate_license(driver.license.as_ref())
    } else if failure.violates_foreign_key(COMPANY_FK) {
        DriverRepositoryError::company_not_found(driver.company_id.to_string())
    } else {
        map_failure(failure)
    }
}

fn into_driver(row: DriverRow) -> Result<Driver, DriverRepositoryError> {
    let id = row.id;
    Driver::try_from(row).map_err(|message| {
        warn!(driver_id = %id, %message, "stored driver row failed validation");
        DriverRepositoryError::query(message)
    })
}

#[async_trait]
impl DriverRepository for DieselDriverRepository {
    async fn list(&self) -> Result<Vec<Driver>, DriverRepositoryError> {
        let mut conn = self.pool.get().await.map_err(|err| map_failure(err.into()))?;
        let rows: Vec<DriverRow> = drivers::table
            .select(DriverRow::as_select())
            .order_by((drivers::name.asc(), drivers::id.asc()))
            .load(&mut conn)
            .await
            .map_err(|err| map_failure(err.into()))?;
        rows.into_iter().map(into_driver).collect()
    }

    async fn find_by_id(&self, id: &DriverId) -> Result<Option<Driver>, DriverRepositoryError> {
        let mut conn = self.pool.get().await.map_err(|err| map_failure(err.into()))?;
        let row = drivers::table
            .find(*id.as_uuid())
            .select(DriverRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_failure(err.into()))?;
        row.map(into_driver).transpose()
    }

    async fn insert(&self, driver: &Driver) -> Result<(), DriverRepositoryError> {
        let mut conn = self.pool.get().await.map_err(|err| map_failure(err.into()))?;
        diesel::insert_into(drivers::table)
            .values(DriverWrite::from(driver))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| write_failure(err.into(), driver))
    }

    async fn update(&self, driver: &Driver) -> Result<bool, DriverRepositoryError> {
        let mut conn = self.pool.get().await.map_err(|err| map_failure(err.into()))?;
        let changes = DriverWrite::from(driver);
        let updated = diesel::update(drivers::table.find(*driver.id.as_uuid()))
            .set((&changes, drivers::updated_at.eq(diesel::dsl::now)))
            .execute(&mut conn)
            .await
            .map_err(|err| write_failure(err.into(), driver))?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &DriverId) -> Result<bool, DriverRepositoryError> {
        let mut conn = self.pool.get().await.map_err(|err| map_failure(err.into()))?;
        let deleted = diesel::delete(drivers::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_failure(err.into()))?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CompanyId, LicenseNumber, Name};
    use rstest::rstest;

    fn driver() -> Driver {
        Driver {
            id: DriverId::random(),
            name: Name::new("Rita").expect("name"),
            license: LicenseNumber::new("97270429357").expect("licence"),
            company_id: CompanyId::random(),
        }
    }

    #[rstest]
    fn constraint_violations_map_to_domain_conflicts() {
        let rita = driver();
        let duplicate = DbFailure::UniqueViolation {
            constraint: Some(LICENSE_CONSTRAINT.to_owned()),
        };
        let orphan = DbFailure::ForeignKeyViolation {
            constraint: Some(COMPANY_FK.to_owned()),
        };

        assert_eq!(
            write_failure(duplicate, &rita),
            DriverRepositoryError::duplicate_license("97270429357")
        );
        assert_eq!(
            write_failure(orphan, &rita),
            DriverRepositoryError::company_not_found(rita.company_id.to_string())
        );
    }

    #[rstest]
    fn pool_failures_are_connection_errors() {
        let err = map_failure(DbFailure::Connection("timed out".to_owned()));
        assert_eq!(err, DriverRepositoryError::connection("timed out"));
    }
}
