use super::*;
use rstest::rstest;

#[rstest]
#[case(AppError::Unauthorized, 401, "UNAUTHORIZED")]
#[case(AppError::InvalidCredentials, 401, "INVALID_CREDENTIALS")]
#[case(AppError::UserExists, 409, "USER_EXISTS")]
#[case(AppError::NotFound("Product".into()), 404, "NOT_FOUND")]
#[case(AppError::Validation("bad".into()), 400, "VALIDATION_ERROR")]
#[case(AppError::Conflict("dup".into()), 409, "CONFLICT")]
#[case(AppError::Database("down".into()), 500, "DATABASE_ERROR")]
#[case(AppError::Internal("oops".into()), 500, "INTERNAL_ERROR")]
fn test_status_and_code(#[case] error: AppError, #[case] status: u16, #[case] code: &str) {
    assert_eq!(error.status_code(), status);
    assert_eq!(error.error_code(), code);
}

#[test]
fn test_client_facing_messages() {
    assert_eq!(AppError::Unauthorized.to_string(), "Unauthorized");
    assert_eq!(
        AppError::InvalidCredentials.to_string(),
        "Invalid credentials"
    );
    assert_eq!(AppError::UserExists.to_string(), "User already exists");
    assert_eq!(
        AppError::NotFound("Customer".into()).to_string(),
        "Customer not found"
    );
    assert_eq!(
        AppError::Validation("Quantity must be positive".into()).to_string(),
        "Quantity must be positive"
    );
}

#[test]
fn test_internal_split() {
    assert!(AppError::Database(String::new()).is_internal());
    assert!(AppError::Internal(String::new()).is_internal());
    assert!(!AppError::Unauthorized.is_internal());
    assert!(!AppError::Validation(String::new()).is_internal());
}
