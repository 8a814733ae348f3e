//! Tests for the failure payload.

use super::*;
use crate::domain::TraceId;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn trace_id() -> TraceId {
    "6f1c1f8e-4b7a-4f55-9d2e-0a4b5e1c2d3f"
        .parse()
        .expect("fixture is a valid UUID")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("taken"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case(ErrorCode::NotFound, "not found")]
#[case(ErrorCode::InternalError, "Internal server error")]
fn blank_messages_fall_back_to_code_message(#[case] code: ErrorCode, #[case] expected: &str) {
    assert_eq!(Error::new(code, "  \t").message(), expected);
}

#[rstest]
fn try_new_rejects_blank_messages() {
    assert_eq!(
        Error::try_new(ErrorCode::Conflict, " "),
        Err(ErrorValidationError::EmptyMessage)
    );
}

#[rstest]
fn no_trace_id_outside_a_request() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn errors_raised_in_scope_carry_the_trace_id(trace_id: TraceId) {
    let error = TraceId::scope(trace_id, async { Error::not_found("movie jaws not found") }).await;

    assert_eq!(error.trace_id(), Some(trace_id.to_string().as_str()));
}

#[rstest]
#[tokio::test]
async fn deserialising_keeps_payload_trace_id_not_ambient_one(trace_id: TraceId) {
    let payload = json!({ "code": "not_found", "message": "missing" });

    let error = TraceId::scope(trace_id, async move {
        serde_json::from_value::<Error>(payload).expect("valid payload")
    })
    .await;

    assert!(error.trace_id().is_none());
}

#[rstest]
fn serialises_camel_case_payload() {
    let error = Error::conflict("movie slug jaws is already taken")
        .with_trace_id("abc")
        .with_details(json!({ "slug": "jaws" }));

    let value = serde_json::to_value(&error).expect("serialise error");

    assert_eq!(
        value,
        json!({
            "code": "conflict",
            "message": "movie slug jaws is already taken",
            "traceId": "abc",
            "details": { "slug": "jaws" },
        })
    );
}

#[rstest]
#[case(json!({ "code": "not_found", "message": "  " }))]
#[case(json!({ "code": "not_found", "message": "x", "extra": 1 }))]
#[case(json!({ "code": "teapot", "message": "x" }))]
fn malformed_payloads_are_rejected(#[case] payload: serde_json::Value) {
    assert!(serde_json::from_value::<Error>(payload).is_err());
}
