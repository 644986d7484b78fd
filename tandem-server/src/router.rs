use crate::session::SessionLifecycle;
use crate::signaling::ws_handler;
use axum::http::Method;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::path::Path;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: String,
    pub service: &'static str,
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339(),
        service: "tandem-server",
    })
}

/// `/ws` signaling endpoint, `/health`, and static files from `public_dir`
/// for everything else.
pub fn create_router(session: SessionLifecycle, public_dir: impl AsRef<Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST]);

    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health))
        .fallback_service(ServeDir::new(public_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(session)
}
