use axum::{Json, extract::rejection::JsonRejection};

use crate::{
    error::AppError,
    message::{ChatRequest, EchoResponse},
    services::echo::echo_reply,
};

pub async fn echo_handler(
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<EchoResponse>, AppError> {
    let Json(payload) = payload?;

    Ok(Json(EchoResponse {
        reply: echo_reply(payload.message()),
    }))
}
