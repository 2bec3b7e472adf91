//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`; these wrappers register equivalent
//! schemas from the adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested ride does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The ride has no remaining capacity.
    #[schema(rename = "conflict")]
    Conflict,
    /// The ride store is unavailable or the ride is too contended; retry later.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "conflict")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Maximum capacity reached")]
    message: String,
    /// Correlation identifier matching the `trace-id` response header.
    #[schema(example = "2f1c7f0e-8a55-4c8e-9df4-0b8f3f0f6d1a")]
    trace_id: Option<String>,
    /// Supplementary error details, such as the invalid field.
    details: Option<serde_json::Value>,
}
