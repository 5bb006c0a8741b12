use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::services::AssistantError;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error::error_response;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub answer: String,
    pub sources: Vec<SourceResponse>,
}

#[derive(Serialize)]
pub struct SourceResponse {
    pub text: String,
    pub page: Option<u32>,
    pub score: f32,
}

#[tracing::instrument(skip(state, request))]
pub async fn chat_handler(
    State(state): State<AppState>,
    request: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(body) => body,
        Err(rejection) => return error_response(rejection.status(), rejection.body_text()),
    };

    tracing::debug!(question = %sanitize_prompt(&request.question), "Processing question");

    match state.assistant.ask(&request.question).await {
        Ok(answer) => {
            tracing::info!(sources_count = answer.sources.len(), "Question answered");
            let sources = answer
                .sources
                .into_iter()
                .map(|s| SourceResponse {
                    text: s.text,
                    page: s.page,
                    score: s.score,
                })
                .collect();

            (
                StatusCode::OK,
                Json(ChatResponse {
                    answer: answer.text,
                    sources,
                }),
            )
                .into_response()
        }
        Err(AssistantError::EmptyQuestion) => {
            error_response(StatusCode::BAD_REQUEST, "Question must not be empty")
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to answer question");
            error_response(
                StatusCode::BAD_GATEWAY,
                format!("Error getting response: {}", e),
            )
        }
    }
}
