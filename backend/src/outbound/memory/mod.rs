//! In-process repositories used when no database is configured and by tests.
//!
//! They enforce the same uniqueness and referential rules as the PostgreSQL
//! schema so the domain services behave identically on either backend.
//! Company and driver repositories share one store so a delete can see the
//! drivers that still reference a company.

mod fleet;
mod users;

pub use fleet::{InMemoryCompanyRepository, InMemoryDriverRepository};
pub use users::InMemoryUserRepository;

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Lock helpers that keep serving data after a panicking writer.
///
/// Every mutation validates before it writes, so a poisoned lock never holds
/// a half-applied change.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
