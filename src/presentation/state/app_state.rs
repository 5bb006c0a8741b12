use std::sync::Arc;

use crate::application::services::LegalAssistant;

#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<LegalAssistant>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(assistant: Arc<LegalAssistant>, max_upload_bytes: usize) -> Self {
        Self {
            assistant,
            max_upload_bytes,
        }
    }
}
