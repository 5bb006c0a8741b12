use std::sync::Arc;

use crate::application::ports::{
    Embedder, EmbedderError, LlmClient, LlmClientError, VectorStore, VectorStoreError,
};
use crate::domain::Message;

use super::legal_prompt::render_legal_prompt;
use super::token_counter::count_tokens;

pub struct RetrievalService {
    embedder: Arc<dyn Embedder>,
    llm_client: Arc<dyn LlmClient>,
    top_k: usize,
    max_history_tokens: usize,
}

impl RetrievalService {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        llm_client: Arc<dyn LlmClient>,
        top_k: usize,
        max_history_tokens: usize,
    ) -> Self {
        Self {
            embedder,
            llm_client,
            top_k,
            max_history_tokens,
        }
    }

    #[tracing::instrument(
        skip(self, store, question, history),
        fields(collection = %store.collection_name(), history_len = history.len())
    )]
    pub async fn answer(
        &self,
        store: &dyn VectorStore,
        question: &str,
        history: &[Message],
    ) -> Result<Answer, RetrievalError> {
        let query_embedding = self
            .embedder
            .embed(question)
            .await
            .map_err(RetrievalError::Embedding)?;

        let results = store.search(&query_embedding, self.top_k).await?;

        if results.is_empty() {
            tracing::warn!("No chunks retrieved, answering without context");
        }

        let context = results
            .iter()
            .map(|r| r.chunk.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let chat_history = format_chat_history(history, self.max_history_tokens);
        let prompt = render_legal_prompt(&context, &chat_history, question);

        let text = self
            .llm_client
            .complete(&prompt)
            .await
            .map_err(RetrievalError::Completion)?;

        let sources = results
            .into_iter()
            .map(|r| SourceChunk {
                text: r.chunk.text,
                page: r.chunk.page,
                score: r.score,
            })
            .collect();

        Ok(Answer { text, sources })
    }
}

/// One line per message, oldest first. When the whole history does not fit in
/// `max_tokens`, the oldest lines are dropped.
pub fn format_chat_history(messages: &[Message], max_tokens: usize) -> String {
    let mut kept = Vec::new();
    let mut used = 0;

    for message in messages.iter().rev() {
        let line = message.as_history_line();
        let cost = count_tokens(&line) + 1;
        if used + cost > max_tokens {
            break;
        }
        used += cost;
        kept.push(line);
    }

    kept.reverse();
    kept.join("\n")
}

#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<SourceChunk>,
}

impl Answer {
    pub fn without_sources(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sources: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SourceChunk {
    pub text: String,
    pub page: Option<u32>,
    pub score: f32,
}

#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("embedding: {0}")]
    Embedding(EmbedderError),
    #[error("search: {0}")]
    Search(#[from] VectorStoreError),
    #[error("completion: {0}")]
    Completion(LlmClientError),
}
