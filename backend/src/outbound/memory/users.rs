//! In-memory `UserRepository`.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRecord, UserRepository};
use crate::domain::{Email, UserId};

use super::{read, write};

/// Accounts keyed by id; email uniqueness is checked on every write.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    records: RwLock<HashMap<UserId, UserRecord>>,
}

fn email_taken(
    records: &HashMap<UserId, UserRecord>,
    email: &Email,
    except: &UserId,
) -> bool {
    records
        .values()
        .any(|existing| existing.user.email() == email && existing.user.id() != except)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, record: &UserRecord) -> Result<(), UserPersistenceError> {
        let mut records = write(&self.records);
        let id = record.user.id();
        if email_taken(&records, record.user.email(), id) {
            return Err(UserPersistenceError::duplicate_email(
                record.user.email().as_ref(),
            ));
        }
        if records.contains_key(id) {
            return Err(UserPersistenceError::query(format!("user {id} already exists")));
        }
        records.insert(*id, record.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, UserPersistenceError> {
        Ok(read(&self.records).get(id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserRecord>, UserPersistenceError> {
        Ok(read(&self.records)
            .values()
            .find(|record| record.user.email() == email)
            .cloned())
    }

    async fn update(&self, record: &UserRecord) -> Result<bool, UserPersistenceError> {
        let mut records = write(&self.records);
        let id = record.user.id();
        if !records.contains_key(id) {
            return Ok(false);
        }
        if email_taken(&records, record.user.email(), id) {
            return Err(UserPersistenceError::duplicate_email(
                record.user.email().as_ref(),
            ));
        }
        records.insert(*id, record.clone());
        Ok(true)
    }
}
