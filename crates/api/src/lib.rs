//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - The GraphQL schema and its resolvers
//! - Identity middleware that turns a bearer token into a caller identity
//! - The health check route

pub mod graphql;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

use flow_shared::JwtService;
use graphql::AppSchema;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Executable GraphQL schema.
    pub schema: AppSchema,
}

impl AppState {
    /// Builds the state and the schema around one pool and token service.
    #[must_use]
    pub fn new(db: DatabaseConnection, jwt_service: JwtService) -> Self {
        let db = Arc::new(db);
        let jwt_service = Arc::new(jwt_service);
        let schema = graphql::build_schema(db.clone(), jwt_service.clone());
        Self {
            db,
            jwt_service,
            schema,
        }
    }
}

/// Creates the main application router.
///
/// Browsers may call the API only from `client_url`, with credentials.
/// Bearer tokens are masked in request traces.
pub fn create_router(state: AppState, client_url: &str) -> Router {
    Router::new()
        .merge(routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetSensitiveRequestHeadersLayer::new([header::AUTHORIZATION]))
        .layer(cors_layer(client_url))
        .with_state(state)
}

fn cors_layer(client_url: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    match HeaderValue::from_str(client_url) {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            tracing::warn!(client_url, "Invalid CORS origin, cross-origin requests disabled");
            layer
        }
    }
}
