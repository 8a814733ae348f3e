//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here describe their wire shape for utoipa and live in the inbound
//! adapter where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or the movie failed validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No movie matched the identifier or slug.
    #[schema(rename = "not_found")]
    NotFound,
    /// Storage rejected the write because the slug is already taken.
    #[schema(rename = "conflict")]
    Conflict,
    /// Movie storage could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "movie failed validation")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details, such as the list of rule violations.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::ViolationDetail`].
///
/// One broken rule reported inside a validation error's `details.violations`.
#[derive(ToSchema)]
#[schema(as = crate::domain::ViolationDetail)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ViolationSchema {
    /// Request field the rule applies to.
    #[schema(example = "slug")]
    field: String,
    /// Stable rule identifier.
    #[schema(example = "duplicate")]
    code: String,
    /// Human-readable description of the violation.
    #[schema(example = "a movie with slug jaws already exists")]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_schema_has_expected_name() {
        let schema_json = schema_to_json::<ErrorSchema>();
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_json.contains("message"));
        assert!(schema_json.contains("traceId"));
        assert!(schema_json.contains("details"));
    }

    #[test]
    fn violation_schema_describes_field_code_and_message() {
        let schema_json = schema_to_json::<ViolationSchema>();
        assert_eq!(ViolationSchema::name(), "crate.domain.ViolationDetail");
        for field in ["field", "code", "message"] {
            assert!(schema_json.contains(field), "missing {field}");
        }
    }

    #[test]
    fn error_code_schema_variants_match_domain() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in [
            "invalid_request",
            "not_found",
            "conflict",
            "service_unavailable",
            "internal_error",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }
}
