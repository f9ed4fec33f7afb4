pub mod error;
mod shifts;
mod staff;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

use error::ApiError;

pub fn create_router(state: Arc<AppState>) -> Router {
    // The frontend may be served from anywhere, so CORS stays wide open
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Staff
        .route(
            "/staff",
            get(staff::list_staff)
                .post(staff::create_staff)
                .fallback(method_not_allowed),
        )
        // Shifts (POST dispatches create/assign/unassign via ?action=)
        .route(
            "/shifts",
            get(shifts::list_shifts)
                .post(shifts::post_shifts)
                .fallback(method_not_allowed),
        )
        .fallback(unknown_endpoint);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed("Method not allowed")
}

async fn unknown_endpoint() -> ApiError {
    ApiError::not_found("Invalid endpoint")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::db;

    async fn test_router() -> Router {
        let pool = db::init_in_memory().await.unwrap();
        create_router(Arc::new(AppState::new(Config::default(), pool)))
    }

    async fn error_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unsupported_method_returns_json_envelope() {
        let app = test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/shifts")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let json = error_body(response).await;
        assert_eq!(json["error"]["code"], "method_not_allowed");
        assert_eq!(json["error"]["message"], "Method not allowed");
    }

    #[tokio::test]
    async fn test_unsupported_method_on_staff_returns_json_envelope() {
        let app = test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/staff")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let json = error_body(response).await;
        assert_eq!(json["error"]["code"], "method_not_allowed");
    }

    #[tokio::test]
    async fn test_unknown_endpoint_returns_json_envelope() {
        let app = test_router().await;

        let response = app
            .oneshot(Request::builder().uri("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = error_body(response).await;
        assert_eq!(json["error"]["code"], "not_found");
        assert_eq!(json["error"]["message"], "Invalid endpoint");
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = test_router().await;

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
