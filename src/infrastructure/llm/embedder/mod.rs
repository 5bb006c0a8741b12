mod embedder_factory;
mod local_candle_embedder;
mod openai_embedder;

pub use embedder_factory::{EmbedderFactory, EmbedderFactoryError};
pub use local_candle_embedder::{LocalCandleEmbedder, Pooling};
pub use openai_embedder::OpenAiEmbedder;
