use axum::{Json, extract::State, extract::rejection::JsonRejection};

use crate::{
    error::AppError,
    message::{ChatRequest, GenerateResponse},
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(payload) = payload?;
    let prompt = payload.message();
    state.check_message_len(prompt)?;

    let response = state.generator.complete(prompt).await?;

    Ok(Json(GenerateResponse { response }))
}
