use std::sync::Arc;

use crate::application::ports::{
    CollectionConfig, Embedder, EmbedderError, FileLoader, FileLoaderError, TextSplitter,
    TextSplitterError, VectorStore, VectorStoreError,
};
use crate::domain::{ContentType, Document, DocumentFingerprint, DocumentId};

const EMBEDDING_BATCH_SIZE: usize = 32;

pub struct IngestionService {
    file_loader: Arc<dyn FileLoader>,
    embedder: Arc<dyn Embedder>,
    text_splitter: Arc<dyn TextSplitter>,
    vector_dimensions: u64,
}

#[derive(Debug, Clone)]
pub struct IngestionReport {
    pub document_id: DocumentId,
    pub fingerprint: DocumentFingerprint,
    pub filename: String,
    pub page_count: usize,
    pub chunk_count: usize,
}

impl IngestionService {
    pub fn new(
        file_loader: Arc<dyn FileLoader>,
        embedder: Arc<dyn Embedder>,
        text_splitter: Arc<dyn TextSplitter>,
        vector_dimensions: u64,
    ) -> Self {
        Self {
            file_loader,
            embedder,
            text_splitter,
            vector_dimensions,
        }
    }

    pub fn vector_dimensions(&self) -> u64 {
        self.vector_dimensions
    }

    #[tracing::instrument(
        skip(self, store, data),
        fields(collection = %store.collection_name(), bytes = data.len())
    )]
    pub async fn ingest(
        &self,
        store: &dyn VectorStore,
        data: &[u8],
        filename: String,
        content_type: ContentType,
    ) -> Result<IngestionReport, IngestionError> {
        let document = Document::new(filename, content_type, data);
        let doc_id = document.id;

        let pages = self.file_loader.extract_pages(data, &document).await?;

        let mut chunks = Vec::new();
        for page in &pages {
            let page_chunks = self
                .text_splitter
                .split(&page.text, doc_id, Some(page.number))
                .await?;
            chunks.extend(page_chunks);
        }

        if chunks.is_empty() {
            return Err(IngestionError::NoChunks(document.filename));
        }

        tracing::debug!(
            pages = pages.len(),
            chunks = chunks.len(),
            "Document split into chunks"
        );

        store
            .create_collection(&CollectionConfig::new(self.vector_dimensions))
            .await?;

        for batch in chunks.chunks(EMBEDDING_BATCH_SIZE) {
            let texts: Vec<&str> = batch.iter().map(|c| c.text.as_str()).collect();
            let embeddings = self.embedder.embed_batch(&texts).await?;
            store.upsert(batch, &embeddings).await?;
        }

        tracing::info!(
            document_id = %doc_id,
            filename = %document.filename,
            chunks = chunks.len(),
            "Document indexed"
        );

        Ok(IngestionReport {
            document_id: doc_id,
            fingerprint: document.fingerprint,
            filename: document.filename,
            page_count: pages.len(),
            chunk_count: chunks.len(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("file loading: {0}")]
    FileLoading(#[from] FileLoaderError),
    #[error("text splitting: {0}")]
    Splitting(#[from] TextSplitterError),
    #[error("embedding: {0}")]
    Embedding(#[from] EmbedderError),
    #[error("storage: {0}")]
    Storage(#[from] VectorStoreError),
    #[error("no indexable text in {0}")]
    NoChunks(String),
}
