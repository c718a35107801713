use std::collections::HashSet;
use std::error::Error as _;

use rstest::rstest;

use super::*;

#[rstest]
#[case(ErrorCode::MalformedRequest, 1, StatusClass::BadRequest)]
#[case(ErrorCode::RouteNotFound, 2, StatusClass::NotFound)]
#[case(ErrorCode::ValidationFailed, 3, StatusClass::Unprocessable)]
#[case(ErrorCode::CustomerNotFound, 4, StatusClass::NotFound)]
#[case(ErrorCode::BankAccountNotFound, 5, StatusClass::NotFound)]
#[case(ErrorCode::Database, 6, StatusClass::Unprocessable)]
#[case(ErrorCode::Unknown, 7, StatusClass::Unprocessable)]
#[case(ErrorCode::DuplicateValue, 8, StatusClass::Unprocessable)]
#[case(ErrorCode::PreferredAlreadySet, 9, StatusClass::Unprocessable)]
fn test_code_table(#[case] code: ErrorCode, #[case] number: u16, #[case] class: StatusClass) {
    assert_eq!(code.as_u16(), number);
    assert_eq!(code.status_class(), class);
}

#[test]
fn test_codes_are_unique() {
    let numbers: HashSet<u16> = ErrorCode::ALL.iter().map(|c| c.as_u16()).collect();
    assert_eq!(numbers.len(), ErrorCode::ALL.len());

    let names: HashSet<&str> = ErrorCode::ALL.iter().map(|c| c.name()).collect();
    assert_eq!(names.len(), ErrorCode::ALL.len());
}

#[test]
fn test_display_appends_code() {
    let err = AppError::preferred_already_set("Customer already has a preferred bank account");
    assert_eq!(
        err.to_string(),
        "Customer already has a preferred bank account (Error code: 9)"
    );
    assert_eq!(err.message(), "Customer already has a preferred bank account");
}

#[test]
fn test_status_class_follows_code() {
    assert_eq!(
        AppError::customer_not_found("x").status_class(),
        StatusClass::NotFound
    );
    assert_eq!(
        AppError::validation("x").status_class(),
        StatusClass::Unprocessable
    );
    assert_eq!(
        AppError::malformed_request("x").status_class(),
        StatusClass::BadRequest
    );
}

#[test]
fn test_source_is_kept_but_not_rendered() {
    let cause = std::io::Error::other("connection reset");
    let err = AppError::database("Unable to create customer. An error occurred while saving.")
        .with_source(cause);

    assert_eq!(
        err.to_string(),
        "Unable to create customer. An error occurred while saving. (Error code: 6)"
    );
    let source = err.source().expect("source should be kept");
    assert_eq!(source.to_string(), "connection reset");
}
