use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::{LoadedDocument, SessionSnapshot};
use crate::domain::{ChatMode, Message};
use crate::presentation::state::AppState;

use super::error::error_response;

#[derive(Serialize)]
pub struct SessionResponse {
    pub mode: ChatMode,
    pub mode_label: &'static str,
    pub ipc_ready: bool,
    pub custom_document: Option<DocumentSummary>,
    pub messages: Vec<MessageResponse>,
}

#[derive(Serialize)]
pub struct DocumentSummary {
    pub filename: String,
    pub fingerprint: String,
    pub page_count: usize,
    pub chunk_count: usize,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub role: &'static str,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct SwitchModeRequest {
    pub mode: ChatMode,
}

impl From<LoadedDocument> for DocumentSummary {
    fn from(doc: LoadedDocument) -> Self {
        Self {
            filename: doc.filename,
            fingerprint: doc.fingerprint.as_str().to_string(),
            page_count: doc.page_count,
            chunk_count: doc.chunk_count,
        }
    }
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            role: message.role.as_str(),
            content: message.content,
            created_at: message.created_at,
        }
    }
}

impl From<SessionSnapshot> for SessionResponse {
    fn from(snapshot: SessionSnapshot) -> Self {
        Self {
            mode: snapshot.mode,
            mode_label: snapshot.mode.label(),
            ipc_ready: snapshot.ipc_ready,
            custom_document: snapshot.custom_document.map(DocumentSummary::from),
            messages: snapshot
                .messages
                .into_iter()
                .map(MessageResponse::from)
                .collect(),
        }
    }
}

pub async fn get_session_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(SessionResponse::from(state.assistant.snapshot().await))
}

#[tracing::instrument(skip(state, request))]
pub async fn switch_mode_handler(
    State(state): State<AppState>,
    request: Result<Json<SwitchModeRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(body) => body,
        Err(rejection) => return error_response(rejection.status(), rejection.body_text()),
    };

    state.assistant.switch_mode(request.mode).await;
    Json(SessionResponse::from(state.assistant.snapshot().await)).into_response()
}

pub async fn clear_messages_handler(State(state): State<AppState>) -> StatusCode {
    state.assistant.clear_history().await;
    tracing::info!("Chat history cleared");
    StatusCode::NO_CONTENT
}
