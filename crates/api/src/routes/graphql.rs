//! GraphQL endpoint and the GraphiQL explorer.

use axum::{
    Json, Router,
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
};

use crate::AppState;
use crate::middleware::auth::CurrentIdentity;

/// Path the schema is served on.
pub const GRAPHQL_PATH: &str = "/graphql";

/// Creates the GraphQL routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(GRAPHQL_PATH, get(graphiql).post(graphql_handler))
}

/// POST /graphql - Execute a query or mutation as the current caller.
async fn graphql_handler(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    let request = match identity {
        Some(identity) => request.data(identity),
        None => request,
    };

    Json(state.schema.execute(request).await)
}

/// GET /graphql - Serve the GraphiQL explorer.
async fn graphiql() -> impl IntoResponse {
    Html(
        async_graphql::http::GraphiQLSource::build()
            .endpoint(GRAPHQL_PATH)
            .finish(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use rstest::rstest;
    use sea_orm::DatabaseConnection;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::create_router;
    use flow_shared::{JwtConfig, JwtService, TokenSubject};

    const CLIENT_URL: &str = "http://localhost:3000";

    /// State without a live database: every request here is decided by the
    /// policy table before any query runs.
    fn test_state() -> AppState {
        AppState::new(
            DatabaseConnection::Disconnected,
            JwtService::new(JwtConfig::default()),
        )
    }

    fn token_for(state: &AppState, role: &str) -> String {
        state
            .jwt_service
            .generate_token(TokenSubject {
                id: Uuid::new_v4(),
                email: "someone@flow-erp.com",
                name: "Someone",
                role,
            })
            .expect("should generate token")
    }

    async fn post_graphql(state: AppState, token: Option<&str>, query: &str) -> Value {
        let app = create_router(state, CLIENT_URL);

        let mut request = Request::builder()
            .method("POST")
            .uri(GRAPHQL_PATH)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = app
            .oneshot(
                request
                    .body(Body::from(json!({ "query": query }).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn assert_unauthorized(body: &Value) {
        assert_eq!(body["errors"][0]["message"], "Unauthorized");
        assert_eq!(body["errors"][0]["extensions"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_anonymous_products_is_rejected() {
        let body = post_graphql(test_state(), None, "{ products { id name } }").await;

        assert_unauthorized(&body);
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_anonymous_me_is_null() {
        let body = post_graphql(test_state(), None, "{ me { id email } }").await;

        assert!(body.get("errors").is_none());
        assert!(body["data"]["me"].is_null());
    }

    #[tokio::test]
    async fn test_invalid_token_degrades_to_anonymous() {
        let body = post_graphql(test_state(), Some("not.a.token"), "{ me { id } }").await;

        assert!(body.get("errors").is_none());
        assert!(body["data"]["me"].is_null());
    }

    #[tokio::test]
    async fn test_token_with_unknown_role_is_anonymous() {
        let state = test_state();
        let token = token_for(&state, "OWNER");

        let body = post_graphql(state, Some(&token), "{ categories { id } }").await;
        assert_unauthorized(&body);
    }

    #[rstest]
    #[case("STAFF", "{ users { id } }")]
    #[case("MANAGER", "{ users { id } }")]
    #[case("STAFF", "{ accounts { id } }")]
    #[case(
        "STAFF",
        r#"mutation { createPurchase(input: { vendorId: "00000000-0000-0000-0000-000000000000", items: [], paidAmount: 0 }) { id } }"#
    )]
    #[case(
        "MANAGER",
        r#"mutation { deleteProduct(id: "00000000-0000-0000-0000-000000000000") { id } }"#
    )]
    #[case(
        "STAFF",
        r#"mutation { register(input: { email: "a@b.c", name: "A", password: "secret1" }) { token } }"#
    )]
    #[tokio::test]
    async fn test_role_below_minimum_is_rejected(#[case] role: &str, #[case] query: &str) {
        let state = test_state();
        let token = token_for(&state, role);

        let body = post_graphql(state, Some(&token), query).await;
        assert_unauthorized(&body);
    }

    #[tokio::test]
    async fn test_graphiql_served_on_get() {
        let app = create_router(test_state(), CLIENT_URL);

        let response = app
            .oneshot(
                Request::builder()
                    .uri(GRAPHQL_PATH)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_cors_allows_client_origin_with_credentials() {
        let app = create_router(test_state(), CLIENT_URL);

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri(GRAPHQL_PATH)
                    .header(header::ORIGIN, CLIENT_URL)
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization,content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], CLIENT_URL);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }
}
