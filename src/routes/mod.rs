// src/routes/mod.rs
pub mod catalog;
pub mod tutor;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use catalog::{scenes_handler, word_handler};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tutor::tutor_handler;

pub fn create_router() -> Router<SharedState> {
    let api_routes = Router::new()
        .route("/tutor", post(tutor_handler))
        .route("/scenes", get(scenes_handler))
        .route("/word/{word}", get(word_handler));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}

/// Serve the stub backend until the listener fails.
pub async fn serve(listener: tokio::net::TcpListener, state: SharedState) -> std::io::Result<()> {
    let app = create_router().with_state(state);
    axum::serve(listener, app).await
}
