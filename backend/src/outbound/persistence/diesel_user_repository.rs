//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRecord, UserRepository};
use crate::domain::{Email, UserId};

use super::diesel_error_mapping::DbFailure;
use super::models::{UserRow, UserWrite};
use super::pool::DbPool;
use super::schema::users;

const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Diesel implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map a failure, naming the duplicate email when `record` was being written.
fn map_failure(failure: DbFailure, record: Option<&UserRecord>) -> UserPersistenceError {
    match (failure, record) {
        (failure, Some(record)) if failure.violates_unique(EMAIL_CONSTRAINT) => {
            UserPersistenceError::duplicate_email(record.user.email().as_ref())
        }
        (DbFailure::Connection(message), _) => UserPersistenceError::connection(message),
        (failure, _) => UserPersistenceError::query(failure.into_query_message()),
    }
}

fn read_failure(error: impl Into<DbFailure>) -> UserPersistenceError {
    map_failure(error.into(), None)
}

fn into_record(row: UserRow) -> Result<UserRecord, UserPersistenceError> {
    let id = row.id;
    UserRecord::try_from(row).map_err(|message| {
        warn!(user_id = %id, %message, "stored user row failed validation");
        UserPersistenceError::query(message)
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, record: &UserRecord) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(read_failure)?;
        diesel::insert_into(users::table)
            .values(UserWrite::from(record))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_failure(err.into(), Some(record)))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(read_failure)?;
        let row = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(read_failure)?;
        row.map(into_record).transpose()
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserRecord>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(read_failure)?;
        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(read_failure)?;
        row.map(into_record).transpose()
    }

    async fn update(&self, record: &UserRecord) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(read_failure)?;
        let changes = UserWrite::from(record);
        let updated = diesel::update(users::table.find(*record.user.id().as_uuid()))
            .set((&changes, users::updated_at.eq(diesel::dsl::now)))
            .execute(&mut conn)
            .await
            .map_err(|err| map_failure(err.into(), Some(record)))?;
        Ok(updated > 0)
    }
}
