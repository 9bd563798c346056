//! # Triage Web Server
//!
//! Axum-based REST and WebSocket surface for the incident assistant.

pub mod routes;
pub mod state;
pub mod stream;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::health::health_check))
        .route("/summarize", post(routes::summarize::summarize))
        .route("/predict", post(routes::incidents::predict))
        .route("/search", post(routes::search::search_similar))
        .route("/history", get(routes::incidents::get_history))
        .route("/ws/logs", get(stream::ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}")).await?;
    tracing::info!("Web server listening on http://{host}:{port}");

    axum::serve(listener, app).await?;
    Ok(())
}
