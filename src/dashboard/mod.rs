//! Display server: Axum app that serves the menu.
//!
//! Serves a JSON API and a self-contained HTML menu page.
//! CORS is open for GET so QR-code landing pages can embed the API.

pub mod routes;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    response::Html,
    routing::get,
    Router,
};
use std::future::Future;
use tower_http::cors::CorsLayer;
use tracing::info;

use routes::AppState;

/// The embedded menu page (compiled into the binary).
const MENU_HTML: &str = include_str!("templates/index.html");

/// Serve the display until `shutdown` resolves.
pub async fn serve(state: AppState, port: u16, shutdown: impl Future<Output = ()> + Send + 'static) -> Result<()> {
    let app = build_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind display port {port}"))?;
    info!(port, "Menu display serving on http://localhost:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Display server error")?;

    Ok(())
}

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_static("*"))
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // API routes
        .route("/api/restaurant", get(routes::get_restaurant))
        .route("/api/categories", get(routes::get_categories))
        .route("/api/menu", get(routes::get_menu))
        .route("/api/menu/:category", get(routes::get_category))
        .route("/api/classify", get(routes::classify_price))
        .route("/health", get(routes::health))
        // Menu page
        .route("/", get(serve_menu_page))
        .layer(cors)
        .with_state(state)
}

/// Serve the embedded HTML menu page.
async fn serve_menu_page() -> Html<&'static str> {
    Html(MENU_HTML)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
