use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, RwLock};

use crate::application::ports::{VectorStore, VectorStoreError};
use crate::domain::{ChatMode, ChatSession, ContentType, DocumentFingerprint, Message};

use super::{Answer, IngestionError, IngestionService, RetrievalError, RetrievalService};

pub const IPC_UNAVAILABLE_ANSWER: &str = "Error: IPC document not properly loaded";
pub const CUSTOM_DOCUMENT_MISSING_ANSWER: &str = "Please load a custom document first";

/// Session-level orchestration: which corpus is active, what has been
/// indexed, and the running conversation.
pub struct LegalAssistant {
    ingestion: Arc<IngestionService>,
    retrieval: Arc<RetrievalService>,
    ipc_store: Arc<dyn VectorStore>,
    custom_store: Arc<dyn VectorStore>,
    ipc_path: PathBuf,
    ipc_ready: AtomicBool,
    session: RwLock<ChatSession>,
    custom_document: RwLock<Option<LoadedDocument>>,
    load_lock: Mutex<()>,
}

#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub filename: String,
    pub fingerprint: DocumentFingerprint,
    pub page_count: usize,
    pub chunk_count: usize,
}

#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Loaded(LoadedDocument),
    AlreadyLoaded(LoadedDocument),
}

impl LoadOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            LoadOutcome::Loaded(_) => "Custom document loaded and indexed successfully",
            LoadOutcome::AlreadyLoaded(_) => "Document already loaded",
        }
    }

    pub fn document(&self) -> &LoadedDocument {
        match self {
            LoadOutcome::Loaded(doc) | LoadOutcome::AlreadyLoaded(doc) => doc,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub mode: ChatMode,
    pub messages: Vec<Message>,
    pub ipc_ready: bool,
    pub custom_document: Option<LoadedDocument>,
}

impl LegalAssistant {
    pub fn new(
        ingestion: Arc<IngestionService>,
        retrieval: Arc<RetrievalService>,
        ipc_store: Arc<dyn VectorStore>,
        custom_store: Arc<dyn VectorStore>,
        ipc_path: PathBuf,
    ) -> Self {
        Self {
            ingestion,
            retrieval,
            ipc_store,
            custom_store,
            ipc_path,
            ipc_ready: AtomicBool::new(false),
            session: RwLock::new(ChatSession::default()),
            custom_document: RwLock::new(None),
            load_lock: Mutex::new(()),
        }
    }

    pub fn is_ipc_ready(&self) -> bool {
        self.ipc_ready.load(Ordering::Acquire)
    }

    /// Reuses a populated IPC collection when its vector size matches the
    /// embedder, otherwise indexes the IPC PDF from disk.
    #[tracing::instrument(skip(self), fields(collection = %self.ipc_store.collection_name()))]
    pub async fn initialize_ipc(&self) -> Result<(), AssistantError> {
        let _guard = self.load_lock.lock().await;
        let expected = self.ingestion.vector_dimensions();

        match self.ipc_store.get_collection_vector_size().await? {
            Some(size) if size == expected => {
                if self.ipc_store.count().await? > 0 {
                    tracing::info!("Reusing indexed IPC collection");
                    self.ipc_ready.store(true, Ordering::Release);
                    return Ok(());
                }
            }
            Some(size) => {
                tracing::warn!(
                    existing = size,
                    expected,
                    "IPC collection vector size mismatch, rebuilding"
                );
                self.ipc_store.delete_collection().await?;
            }
            None => {}
        }

        let data = match tokio::fs::read(&self.ipc_path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AssistantError::IpcDocumentMissing(self.ipc_path.clone()));
            }
            Err(e) => {
                return Err(AssistantError::IpcDocumentUnreadable(
                    self.ipc_path.clone(),
                    e,
                ));
            }
        };

        let filename = self
            .ipc_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "ipc.pdf".to_string());

        let report = match self
            .ingestion
            .ingest(self.ipc_store.as_ref(), &data, filename, ContentType::Pdf)
            .await
        {
            Ok(report) => report,
            Err(e) => {
                discard_partial_collection(self.ipc_store.as_ref()).await;
                return Err(e.into());
            }
        };

        tracing::info!(
            pages = report.page_count,
            chunks = report.chunk_count,
            "IPC document loaded and indexed"
        );
        self.ipc_ready.store(true, Ordering::Release);
        Ok(())
    }

    #[tracing::instrument(skip(self, data), fields(filename = %filename, bytes = data.len()))]
    pub async fn load_custom_document(
        &self,
        data: &[u8],
        filename: String,
        content_type: ContentType,
    ) -> Result<LoadOutcome, AssistantError> {
        self.ensure_custom_mode().await?;

        let _guard = self.load_lock.lock().await;
        self.ensure_custom_mode().await?;
        let fingerprint = DocumentFingerprint::of(data);

        if let Some(current) = self.custom_document.read().await.as_ref() {
            if current.fingerprint == fingerprint {
                tracing::info!(fingerprint = %fingerprint, "Document already loaded");
                return Ok(LoadOutcome::AlreadyLoaded(current.clone()));
            }
        }

        *self.custom_document.write().await = None;
        self.custom_store.delete_collection().await?;

        let report = match self
            .ingestion
            .ingest(self.custom_store.as_ref(), data, filename, content_type)
            .await
        {
            Ok(report) => report,
            Err(e) => {
                discard_partial_collection(self.custom_store.as_ref()).await;
                return Err(e.into());
            }
        };

        if let Err(e) = self.ensure_custom_mode().await {
            tracing::info!("Mode changed while indexing, custom document discarded");
            discard_partial_collection(self.custom_store.as_ref()).await;
            return Err(e);
        }

        let loaded = LoadedDocument {
            filename: report.filename,
            fingerprint: report.fingerprint,
            page_count: report.page_count,
            chunk_count: report.chunk_count,
        };
        *self.custom_document.write().await = Some(loaded.clone());

        Ok(LoadOutcome::Loaded(loaded))
    }

    /// Answers from the active corpus. The exchange is recorded only if the
    /// session is still in the mode the question was asked in.
    #[tracing::instrument(skip(self, question))]
    pub async fn ask(&self, question: &str) -> Result<Answer, AssistantError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AssistantError::EmptyQuestion);
        }

        let (mode, history) = {
            let session = self.session.read().await;
            (session.mode, session.messages.clone())
        };

        let answer = match mode {
            ChatMode::Ipc if !self.is_ipc_ready() => {
                Answer::without_sources(IPC_UNAVAILABLE_ANSWER)
            }
            ChatMode::Ipc => {
                self.retrieval
                    .answer(self.ipc_store.as_ref(), question, &history)
                    .await?
            }
            ChatMode::CustomDocument => {
                if self.custom_document.read().await.is_none() {
                    Answer::without_sources(CUSTOM_DOCUMENT_MISSING_ANSWER)
                } else {
                    self.retrieval
                        .answer(self.custom_store.as_ref(), question, &history)
                        .await?
                }
            }
        };

        let mut session = self.session.write().await;
        if session.mode == mode {
            session.record_exchange(question.to_string(), answer.text.clone());
        } else {
            tracing::debug!("Mode changed while answering, exchange not recorded");
        }

        Ok(answer)
    }

    async fn ensure_custom_mode(&self) -> Result<(), AssistantError> {
        if self.session.read().await.mode != ChatMode::CustomDocument {
            return Err(AssistantError::NotInCustomDocumentMode);
        }
        Ok(())
    }

    pub async fn switch_mode(&self, mode: ChatMode) -> bool {
        let changed = self.session.write().await.switch_mode(mode);
        if changed {
            tracing::info!(mode = %mode, "Chat mode changed, history cleared");
        }
        changed
    }

    pub async fn clear_history(&self) {
        self.session.write().await.clear();
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let session = self.session.read().await;
        SessionSnapshot {
            mode: session.mode,
            messages: session.messages.clone(),
            ipc_ready: self.is_ipc_ready(),
            custom_document: self.custom_document.read().await.clone(),
        }
    }
}

/// A failed ingest can leave some batches behind; a non-empty collection
/// would otherwise be reused as if it were complete.
async fn discard_partial_collection(store: &dyn VectorStore) {
    if let Err(e) = store.delete_collection().await {
        tracing::error!(
            collection = %store.collection_name(),
            error = %e,
            "Failed to drop partially indexed collection"
        );
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("question is empty")]
    EmptyQuestion,
    #[error("switch to Custom Document mode to upload a document")]
    NotInCustomDocumentMode,
    #[error("IPC document not found at {0}")]
    IpcDocumentMissing(PathBuf),
    #[error("IPC document at {0} could not be read: {1}")]
    IpcDocumentUnreadable(PathBuf, std::io::Error),
    #[error(transparent)]
    Ingestion(#[from] IngestionError),
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
    #[error(transparent)]
    VectorStore(#[from] VectorStoreError),
}
