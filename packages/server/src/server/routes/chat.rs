//! Chat endpoint

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::{extract::Extension, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::domains::chat::{relay_chat, ChatTurn};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequestBody {
    pub messages: Vec<ChatTurn>,
}

#[derive(Serialize)]
struct ChatErrorResponse {
    error: String,
}

fn chat_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ChatErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Relay a transcript to Gemini and return the assistant turn
///
/// Returns 400 on an empty or malformed transcript (no collaborator call is
/// made), 500 when the Gemini credential is missing or the collaborator
/// fails. Collaborator errors are logged and never propagated raw.
pub async fn chat_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<ChatRequestBody>, JsonRejection>,
) -> Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(_) => return chat_error(StatusCode::BAD_REQUEST, "Invalid request body"),
    };

    if body.messages.is_empty() {
        return chat_error(StatusCode::BAD_REQUEST, "Invalid request body");
    }

    let Some(model) = state.deps.chat_model.clone() else {
        return chat_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Gemini API key is not configured",
        );
    };

    match relay_chat(&body.messages, model.as_ref()).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Chat relay failed");
            chat_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred while processing your request",
            )
        }
    }
}
