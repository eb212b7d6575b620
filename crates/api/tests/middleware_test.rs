use axum::http::StatusCode;
use axum::response::IntoResponse;
use pretty_assertions::assert_eq;
use rstest::rstest;

use slotbook_api::middleware::error_handling::AppError;
use slotbook_core::errors::SlotError;

#[rstest]
#[case(SlotError::NotFound("missing".to_string()), StatusCode::NOT_FOUND)]
#[case(SlotError::Validation("bad input".to_string()), StatusCode::BAD_REQUEST)]
#[case(SlotError::Conflict("overlap".to_string()), StatusCode::CONFLICT)]
#[case(SlotError::AlreadyBooked("taken".to_string()), StatusCode::CONFLICT)]
#[case(SlotError::LookupFailed("directory down".to_string()), StatusCode::BAD_GATEWAY)]
#[case(SlotError::Database(eyre::eyre!("db down")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: SlotError, #[case] expected: StatusCode) {
    let response = AppError(error).into_response();
    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_error_body_is_json_with_message() {
    let response = AppError(SlotError::Conflict(
        "Conflicts with 2 existing slots on monday".to_string(),
    ))
    .into_response();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");

    assert_eq!(
        body["error"],
        "Schedule conflict: Conflicts with 2 existing slots on monday"
    );
}

#[test]
fn test_eyre_report_converts_via_question_mark() {
    fn handler_fragment() -> Result<(), AppError> {
        Err(eyre::eyre!("connection refused"))?;
        Ok(())
    }

    let response = handler_fragment().unwrap_err().into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
