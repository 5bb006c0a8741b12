mod chat_completion_client;
mod embedder;

pub use chat_completion_client::ChatCompletionClient;
pub use embedder::{
    EmbedderFactory, EmbedderFactoryError, LocalCandleEmbedder, OpenAiEmbedder, Pooling,
};
