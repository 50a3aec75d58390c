//! Conversion of application errors into GraphQL errors.
//!
//! Every error keeps its display text as the message and carries the
//! [`AppError::error_code`] under `extensions.code`.

use async_graphql::ErrorExtensions;
use flow_core::auth::{AuthError, PasswordError};
use flow_shared::{AppError, JwtError};

/// Converts an [`AppError`] into a GraphQL error, logging server-side
/// failures.
pub fn to_graphql_error(err: AppError) -> async_graphql::Error {
    if err.is_internal() {
        tracing::error!(error = %err, code = err.error_code(), "Request failed");
    }

    let code = err.error_code();
    async_graphql::Error::new(err.to_string()).extend_with(|_, ext| ext.set("code", code.to_string()))
}

/// Maps a policy denial. The caller only ever sees "Unauthorized".
pub fn unauthorized(err: AuthError) -> async_graphql::Error {
    match err {
        AuthError::Unauthenticated { operation } => {
            tracing::debug!(?operation, "Anonymous caller denied");
        }
        AuthError::InsufficientRole {
            operation,
            required,
            actual,
        } => {
            tracing::warn!(?operation, %required, %actual, "Caller role too low");
        }
    }
    to_graphql_error(AppError::Unauthorized)
}

/// Maps a password failure: a short password is the caller's fault,
/// anything else is ours.
pub fn password_error(err: PasswordError) -> async_graphql::Error {
    match err {
        PasswordError::TooShort => to_graphql_error(AppError::Validation(err.to_string())),
        other => to_graphql_error(AppError::Internal(other.to_string())),
    }
}

/// Maps a token signing failure.
pub fn token_error(err: JwtError) -> async_graphql::Error {
    to_graphql_error(AppError::Internal(err.to_string()))
}

/// Adapter from any error convertible to [`AppError`].
pub trait GraphqlResultExt<T> {
    /// Converts the error side into a GraphQL error.
    fn gql(self) -> async_graphql::Result<T>;
}

impl<T, E> GraphqlResultExt<T> for Result<T, E>
where
    E: Into<AppError>,
{
    fn gql(self) -> async_graphql::Result<T> {
        self.map_err(|e| to_graphql_error(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::Value;
    use flow_core::auth::{Operation, Role};
    use rstest::rstest;

    fn code_of(err: &async_graphql::Error) -> Option<Value> {
        err.extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned()
    }

    #[rstest]
    #[case(AppError::Unauthorized, "Unauthorized", "UNAUTHORIZED")]
    #[case(AppError::InvalidCredentials, "Invalid credentials", "INVALID_CREDENTIALS")]
    #[case(AppError::UserExists, "User already exists", "USER_EXISTS")]
    #[case(AppError::NotFound("Product".into()), "Product not found", "NOT_FOUND")]
    #[case(AppError::Validation("bad".into()), "bad", "VALIDATION_ERROR")]
    fn test_message_and_code(
        #[case] err: AppError,
        #[case] message: &str,
        #[case] code: &str,
    ) {
        let gql = to_graphql_error(err);
        assert_eq!(gql.message, message);
        assert_eq!(code_of(&gql), Some(Value::from(code.to_string())));
    }

    #[test]
    fn test_policy_denials_look_identical() {
        let anonymous = unauthorized(AuthError::Unauthenticated {
            operation: Operation::Users,
        });
        let too_low = unauthorized(AuthError::InsufficientRole {
            operation: Operation::Users,
            required: Role::Admin,
            actual: Role::Staff,
        });

        assert_eq!(anonymous.message, "Unauthorized");
        assert_eq!(anonymous.message, too_low.message);
    }

    #[test]
    fn test_short_password_is_validation_error() {
        let gql = password_error(PasswordError::TooShort);
        assert_eq!(
            code_of(&gql),
            Some(Value::from("VALIDATION_ERROR".to_string()))
        );
    }
}
