use rstest::rstest;

use super::*;

#[rstest]
#[case(AppError::BadRequest(String::new()), 400, "bad_request")]
#[case(AppError::Internal(String::new()), 500, "internal_error")]
fn test_status_and_code(#[case] error: AppError, #[case] status: u16, #[case] code: &str) {
    assert_eq!(error.status_code(), status);
    assert_eq!(error.error_code(), code);
}

#[test]
fn test_error_display() {
    assert_eq!(
        AppError::BadRequest("msg".into()).to_string(),
        "Bad request: msg"
    );
    assert_eq!(
        AppError::Internal("msg".into()).to_string(),
        "Internal error: msg"
    );
}
