mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    API_KEY_ENV_VAR, ChunkingSettings, DocumentsSettings, EmbeddingProvider, EmbeddingsSettings,
    LlmProvider, LlmSettings, LoggingSettings, RetrievalSettings, ServerSettings, Settings,
    VectorStoreProvider, VectorStoreSettings,
};
