//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their serialised shape for the generated document.

use std::collections::BTreeMap;

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode, rename_all = "snake_case")]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The request conflicts with existing state.
    Conflict,
    /// A dependency is temporarily unavailable.
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    InternalError,
}

/// Field-level validation details attached to `invalid_request` and
/// `conflict` errors.
#[derive(ToSchema)]
#[schema(as = FieldErrorDetails)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FieldErrorDetailsSchema {
    /// Reason code, such as `invalid_check_digit`.
    #[schema(example = "invalid_check_digit")]
    code: String,
    /// Messages keyed by JSON field name.
    fields: BTreeMap<String, String>,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "tax id check digits do not match")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "7d3f1f1e-8a0b-4c8e-9d52-1f7a9b6c2e10")]
    trace_id: Option<String>,
    /// Supplementary error details.
    details: Option<FieldErrorDetailsSchema>,
}
