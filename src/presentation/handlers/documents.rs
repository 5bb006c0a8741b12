use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::AssistantError;
use crate::domain::ContentType;
use crate::presentation::state::AppState;

use super::error::error_response;
use super::session::DocumentSummary;

#[derive(Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    pub document: DocumentSummary,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_document_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let (filename, content_type, data) = loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                tracing::warn!("Upload request with no file");
                return error_response(StatusCode::BAD_REQUEST, "No file uploaded");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return error_response(e.status(), format!("Failed to read upload: {}", e));
            }
        };

        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let mime = field.content_type().map(str::to_string);

        tracing::debug!(filename = %filename, content_type = ?mime, "Processing file upload");

        let Some(content_type) = ContentType::detect(mime.as_deref(), &filename) else {
            tracing::warn!(content_type = ?mime, "Unsupported content type");
            return error_response(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Only PDF documents are supported",
            );
        };

        match field.bytes().await {
            Ok(data) => break (filename, content_type, data),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read file bytes");
                return error_response(e.status(), format!("Failed to read upload: {}", e));
            }
        }
    };

    if data.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Uploaded file is empty");
    }

    match state
        .assistant
        .load_custom_document(&data, filename, content_type)
        .await
    {
        Ok(outcome) => {
            tracing::info!(
                message = outcome.message(),
                chunks = outcome.document().chunk_count,
                "Custom document upload handled"
            );
            (
                StatusCode::OK,
                Json(UploadResponse {
                    message: outcome.message(),
                    document: outcome.document().clone().into(),
                }),
            )
                .into_response()
        }
        Err(e @ AssistantError::NotInCustomDocumentMode) => {
            error_response(StatusCode::CONFLICT, e.to_string())
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load custom document");
            error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Error loading custom document: {}", e),
            )
        }
    }
}
