//! Identity middleware.
//!
//! Every request passes through [`identity_middleware`]. A valid bearer token
//! attaches an [`Identity`] to the request; anything else (no header, a
//! malformed or expired token, an unknown role) leaves the request anonymous.
//! Whether anonymous callers may proceed is decided per operation by the
//! policy table, not here.

use std::convert::Infallible;
use std::str::FromStr;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::AppState;
use flow_core::auth::Role;
use flow_shared::{Claims, JwtError};

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// User ID.
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role used for authorization.
    pub role: Role,
}

impl TryFrom<Claims> for Identity {
    type Error = String;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let role = Role::from_str(&claims.role)?;
        Ok(Self {
            id: claims.id,
            email: claims.email,
            name: claims.name,
            role,
        })
    }
}

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

/// Resolves the caller identity from the Authorization header and stores it in
/// the request extensions.
pub async fn identity_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token);

    if let Some(token) = token {
        match state.jwt_service.validate_token(token) {
            Ok(claims) => match Identity::try_from(claims) {
                Ok(identity) => {
                    request.extensions_mut().insert(identity);
                }
                Err(reason) => tracing::debug!(%reason, "Token carries an unusable role"),
            },
            Err(JwtError::Expired) => tracing::debug!("Expired token, treating as anonymous"),
            Err(e) => tracing::debug!(error = %e, "Invalid token, treating as anonymous"),
        }
    }

    next.run(request).await
}

/// Extractor for the optional caller identity.
///
/// Never rejects: anonymous requests yield `CurrentIdentity(None)`.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Option<Identity>);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<Identity>().cloned()))
    }
}
