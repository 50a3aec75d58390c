//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::identity_middleware};

pub mod graphql;
pub mod health;

/// Creates the API router. The GraphQL endpoint sits behind the identity
/// middleware; the health check does not.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let graphql_routes = graphql::routes().layer(middleware::from_fn_with_state(
        state.clone(),
        identity_middleware,
    ));

    Router::new()
        .merge(health::routes())
        .merge(graphql_routes)
}
