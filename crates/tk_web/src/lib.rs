use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/feed", get(handlers::get_feed))
        .route("/api/state", get(handlers::get_state))
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/refresh", post(handlers::refresh))
        .route("/api/retry", post(handlers::retry))
        .route("/api/category/:id", post(handlers::select_category))
        .route("/api/menu/toggle", post(handlers::toggle_menu))
        .route("/api/menu/close", post(handlers::close_menu))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌐 Serving feed on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::time::Duration;
    use tk_feed::FeedController;
    use tk_inference::fetchers::MockFetcher;
    use tower::ServiceExt;

    fn app() -> (Arc<FeedController>, Router) {
        let controller = Arc::new(FeedController::new(Arc::new(MockFetcher::new(Duration::ZERO))));
        (controller.clone(), create_app(AppState::new(controller)))
    }

    async fn call(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_feed_before_first_fetch() {
        let (_, app) = app();
        let (status, body) = call(&app, "GET", "/api/feed").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["showSkeleton"], true);
        assert_eq!(body["articles"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_refresh_then_filter() {
        let (_, app) = app();
        let (status, body) = call(&app, "POST", "/api/refresh").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["dispatched"], true);
        assert_eq!(body["phase"], "ready");
        assert_eq!(body["feed"]["articles"].as_array().unwrap().len(), 6);
        assert_eq!(body["feed"]["ticker"].as_array().unwrap().len(), 2);

        let (status, body) = call(&app, "POST", "/api/category/Sports").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["heading"], "Sports News");
        assert_eq!(body["articles"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_category_is_rejected() {
        let (controller, app) = app();
        let (status, body) = call(&app, "POST", "/api/category/Weather").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("Weather"));
        assert_eq!(controller.snapshot().category, "All");
    }

    #[tokio::test]
    async fn test_menu_toggle() {
        let (_, app) = app();
        let (_, body) = call(&app, "POST", "/api/menu/toggle").await;
        assert_eq!(body["sidebarOpen"], true);
        let (_, body) = call(&app, "POST", "/api/menu/close").await;
        assert_eq!(body["sidebarOpen"], false);
    }

    #[tokio::test]
    async fn test_categories_and_state() {
        let (_, app) = app();
        let (_, body) = call(&app, "GET", "/api/categories").await;
        assert_eq!(body.as_array().unwrap().len(), 6);
        assert_eq!(body[4]["label"], "Technology");

        let (_, body) = call(&app, "GET", "/api/state").await;
        assert_eq!(body["phase"], "idle");
        assert_eq!(body["loading"], true);
    }
}
