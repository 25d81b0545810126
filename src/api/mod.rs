use crate::state::AppState;
use axum::{
    routing::{any, get},
    Router,
};

pub mod chat;
pub mod common;

pub fn build_routes(state: AppState) -> Router {
    let router = Router::new()
        // Chat
        .route("/chat", any(chat::handle_chat))
        .route("/api/chat", any(chat::handle_chat))
        // Health
        .route("/healthz", get(|| async { "ok" }))
        .with_state(state)
        .layer(axum::middleware::from_fn(common::request_logger));

    common::with_cors_headers(router)
}
