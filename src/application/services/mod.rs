mod ingestion_service;
mod legal_assistant;
mod legal_prompt;
mod retrieval_service;
mod token_counter;

pub use ingestion_service::{IngestionError, IngestionReport, IngestionService};
pub use legal_assistant::{
    AssistantError, CUSTOM_DOCUMENT_MISSING_ANSWER, IPC_UNAVAILABLE_ANSWER, LegalAssistant,
    LoadOutcome, LoadedDocument, SessionSnapshot,
};
pub use legal_prompt::{LEGAL_SYSTEM_TEMPLATE, render_legal_prompt};
pub use retrieval_service::{
    Answer, RetrievalError, RetrievalService, SourceChunk, format_chat_history,
};
pub use token_counter::count_tokens;
