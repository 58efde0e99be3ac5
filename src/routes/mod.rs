// src/routes/mod.rs
pub mod chat;
pub mod chatbot;
pub mod echo;

use crate::{message::HealthResponse, state::SharedState};
use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use chat::chat_handler;
use chatbot::chatbot_handler;
use echo::echo_handler;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/api/message", post(echo_handler))
        .route("/chat", post(chat_handler))
        .route("/chatbot", post(chatbot_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}

async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.generator.model().to_string(),
    })
}
