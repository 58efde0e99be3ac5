use axum::{Json, extract::State, extract::rejection::JsonRejection};

use crate::{
    error::AppError,
    message::{ChatbotRequest, ChatbotResponse},
    services::conversation::{HISTORY_WINDOW, Role, build_prompt, extract_reply},
    state::SharedState,
};

pub async fn chatbot_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatbotRequest>, JsonRejection>,
) -> Result<Json<ChatbotResponse>, AppError> {
    let Json(payload) = payload?;
    let message = payload.message();
    state.check_message_len(message)?;

    let chat_id = match payload.chat_id() {
        Some(id) => id.to_string(),
        None => state.conversations.create().await,
    };

    let history = state.conversations.recent(&chat_id, HISTORY_WINDOW).await;
    let prompt = build_prompt(&history, message);
    let generated = state.generator.complete(&prompt).await?;
    let reply = extract_reply(&prompt, &generated);

    // Only successful exchanges enter the history.
    state.conversations.append(&chat_id, Role::User, message).await;
    state.conversations.append(&chat_id, Role::Bot, reply.as_str()).await;
    tracing::debug!(%chat_id, history = history.len(), "chatbot turn stored");

    Ok(Json(ChatbotResponse { chat_id, reply }))
}
