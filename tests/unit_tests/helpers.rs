use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

use nyaya::application::ports::{
    ChatPrompt, Embedder, EmbedderError, FileLoader, FileLoaderError, LlmClient, LlmClientError,
    PageText,
};
use nyaya::domain::{Document, Embedding};

pub const TEST_DIMENSIONS: u64 = 8;

/// Deterministic bag-of-bytes embedding: texts sharing words land close
/// together under cosine similarity.
pub struct KeywordEmbedder;

impl KeywordEmbedder {
    pub fn vector(text: &str) -> Embedding {
        let mut values = vec![0.0f32; TEST_DIMENSIONS as usize];
        for byte in text.to_lowercase().bytes().filter(u8::is_ascii_alphabetic) {
            values[byte as usize % TEST_DIMENSIONS as usize] += 1.0;
        }
        Embedding::normalized(values)
    }
}

#[async_trait::async_trait]
impl Embedder for KeywordEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError> {
        Ok(Self::vector(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        Ok(texts.iter().map(|t| Self::vector(t)).collect())
    }
}

pub struct FailingEmbedder;

#[async_trait::async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Embedding, EmbedderError> {
        Err(EmbedderError::InferenceFailed("model offline".to_string()))
    }

    async fn embed_batch(&self, _texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        Err(EmbedderError::InferenceFailed("model offline".to_string()))
    }
}

/// Embeds like `KeywordEmbedder` until its `fail_on`-th batch call, which
/// fails. Later calls succeed again.
pub struct FlakyEmbedder {
    calls: AtomicUsize,
    fail_on: usize,
}

impl FlakyEmbedder {
    pub fn failing_on_batch(fail_on: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_on,
        }
    }
}

#[async_trait::async_trait]
impl Embedder for FlakyEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError> {
        Ok(KeywordEmbedder::vector(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on {
            return Err(EmbedderError::InferenceFailed("connection reset".to_string()));
        }
        Ok(texts.iter().map(|t| KeywordEmbedder::vector(t)).collect())
    }
}

/// Replies with a fixed answer and keeps every prompt it was sent.
pub struct RecordingLlmClient {
    reply: String,
    prompts: Mutex<Vec<ChatPrompt>>,
}

impl RecordingLlmClient {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<ChatPrompt> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> ChatPrompt {
        self.prompts().pop().expect("no prompt recorded")
    }
}

#[async_trait::async_trait]
impl LlmClient for RecordingLlmClient {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, LlmClientError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        Ok(self.reply.clone())
    }
}

pub struct FailingLlmClient;

#[async_trait::async_trait]
impl LlmClient for FailingLlmClient {
    async fn complete(&self, _prompt: &ChatPrompt) -> Result<String, LlmClientError> {
        Err(LlmClientError::RateLimited)
    }
}

/// Ignores the bytes and returns the configured pages.
pub struct StaticFileLoader {
    pages: Vec<PageText>,
}

impl StaticFileLoader {
    pub fn new(pages: &[&str]) -> Self {
        Self {
            pages: pages
                .iter()
                .enumerate()
                .map(|(i, text)| PageText {
                    number: i as u32 + 1,
                    text: text.to_string(),
                })
                .collect(),
        }
    }
}

#[async_trait::async_trait]
impl FileLoader for StaticFileLoader {
    async fn extract_pages(
        &self,
        _data: &[u8],
        document: &Document,
    ) -> Result<Vec<PageText>, FileLoaderError> {
        if self.pages.is_empty() {
            return Err(FileLoaderError::NoTextFound(document.filename.clone()));
        }
        Ok(self.pages.clone())
    }
}

/// Returns its pages only after `release` is notified, signalling `entered`
/// once extraction has started.
pub struct GatedFileLoader {
    inner: StaticFileLoader,
    pub entered: Notify,
    pub release: Notify,
}

impl GatedFileLoader {
    pub fn new(pages: &[&str]) -> Self {
        Self {
            inner: StaticFileLoader::new(pages),
            entered: Notify::new(),
            release: Notify::new(),
        }
    }
}

#[async_trait::async_trait]
impl FileLoader for GatedFileLoader {
    async fn extract_pages(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<Vec<PageText>, FileLoaderError> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.extract_pages(data, document).await
    }
}
