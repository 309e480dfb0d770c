//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("who"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("denied"), ErrorCode::Forbidden)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("taken"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] code: ErrorCode) {
    assert_eq!(error.code(), code);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn blank_convenience_messages_are_replaced() {
    assert_eq!(Error::conflict(" ").message(), "unspecified error");
}

#[rstest]
fn try_with_trace_id_rejects_empty_values() {
    let result = Error::invalid_request("bad").try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn trace_id_is_absent_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn constructors_capture_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id.parse().expect("valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::conflict("slot taken") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
#[tokio::test]
async fn deserialising_ignores_ambient_trace(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id.parse().expect("valid UUID");
    let error = TraceId::scope(trace_id, async move {
        serde_json::from_value::<Error>(json!({"code": "not_found", "message": "gone"}))
            .expect("valid payload")
    })
    .await;

    assert!(error.trace_id().is_none());
}

#[rstest]
fn serialises_camel_case_payload(expected_trace_id: String) {
    let error = Error::conflict("taken")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"field": "label"}));

    let value = serde_json::to_value(&error).expect("serialise");
    assert_eq!(
        value,
        json!({
            "code": "conflict",
            "message": "taken",
            "traceId": expected_trace_id,
            "details": {"field": "label"},
        })
    );
}

#[rstest]
fn rejects_blank_message_on_deserialise() {
    let result = serde_json::from_value::<Error>(json!({"code": "conflict", "message": ""}));
    assert!(result.is_err());
}

#[rstest]
fn operation_failed_keeps_cause_in_details() {
    let error = Error::operation_failed("update table", "connection reset");
    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), "failed to update table");
    assert_eq!(
        error.details(),
        Some(&json!({"operation": "update table", "reason": "connection reset"}))
    );
}

#[rstest]
#[case(PaginationError::ZeroLimit, ErrorCode::InvalidRequest)]
#[case(PaginationError::LimitTooLarge { limit: 500, max: 100 }, ErrorCode::InvalidRequest)]
#[case(PaginationError::ResultsExceedLimit { len: 3, limit: 2 }, ErrorCode::InternalError)]
fn pagination_errors_map_by_origin(#[case] source: PaginationError, #[case] code: ErrorCode) {
    assert_eq!(Error::from(source).code(), code);
}
