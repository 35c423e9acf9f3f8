//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories on Diesel.
//! - **memory**: in-process repositories for tests and database-less runs.
//! - **security**: Argon2id password hashing.
//!
//! Adapters translate between domain types and infrastructure
//! representations; they hold no business rules.

pub mod memory;
pub mod persistence;
pub mod security;
