//! Shared classification of Diesel failures.
//!
//! Repositories turn a [`DbFailure`] into their own port error; only the
//! constraint-specific variants differ between them.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Database failure reduced to what the repositories distinguish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DbFailure {
    Connection(String),
    Query(String),
    UniqueViolation { constraint: Option<String> },
    ForeignKeyViolation { constraint: Option<String> },
}

impl DbFailure {
    /// Whether this is a unique violation on `constraint`.
    ///
    /// A violation without a reported constraint name matches any constraint.
    pub(crate) fn violates_unique(&self, constraint: &str) -> bool {
        matches!(self, Self::UniqueViolation { constraint: reported }
            if reported.as_deref().is_none_or(|name| name == constraint))
    }

    pub(crate) fn violates_foreign_key(&self, constraint: &str) -> bool {
        matches!(self, Self::ForeignKeyViolation { constraint: reported }
            if reported.as_deref().is_none_or(|name| name == constraint))
    }

    /// Message for the generic `Query` variant of a port error.
    pub(crate) fn into_query_message(self) -> String {
        match self {
            Self::Connection(message) | Self::Query(message) => message,
            Self::UniqueViolation { constraint } | Self::ForeignKeyViolation { constraint } => {
                format!(
                    "constraint violated: {}",
                    constraint.as_deref().unwrap_or("unknown")
                )
            }
        }
    }
}

impl From<PoolError> for DbFailure {
    fn from(error: PoolError) -> Self {
        Self::Connection(error.into_message())
    }
}

impl From<DieselError> for DbFailure {
    fn from(error: DieselError) -> Self {
        match &error {
            DieselError::DatabaseError(kind, info) => {
                debug!(?kind, message = info.message(), "diesel operation failed");
            }
            _ => debug!(
                error_type = %std::any::type_name_of_val(&error),
                "diesel operation failed"
            ),
        }

        match error {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation {
                    constraint: info.constraint_name().map(str::to_owned),
                }
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Self::ForeignKeyViolation {
                    constraint: info.constraint_name().map(str::to_owned),
                }
            }
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
                Self::Connection("database connection error".to_owned())
            }
            DieselError::NotFound => Self::Query("record not found".to_owned()),
            DieselError::QueryBuilderError(_) => Self::Query("database query error".to_owned()),
            _ => Self::Query("database error".to_owned()),
        }
    }
}
