//! Fleet registry backend.
//!
//! A session-authenticated REST API for user accounts, companies and their
//! drivers, built as a hexagon: `domain` holds the rules and ports,
//! `inbound` adapts HTTP onto the driving ports and `outbound` implements
//! the driven ports over PostgreSQL, memory and Argon2.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(feature = "test-support")]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
