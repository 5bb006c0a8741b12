use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{
    CollectionConfig, DistanceMetric, SearchResult, VectorStore, VectorStoreError,
};
use crate::domain::{Chunk, Embedding};

/// Process-local collection. Lost on restart.
pub struct InMemoryVectorStore {
    collection_name: String,
    collection: RwLock<Option<Collection>>,
}

struct Collection {
    dimensions: u64,
    metric: DistanceMetric,
    points: Vec<(Chunk, Embedding)>,
}

impl Collection {
    fn score(&self, query: &Embedding, candidate: &Embedding) -> f32 {
        match self.metric {
            DistanceMetric::Cosine => query.cosine_similarity(candidate),
            DistanceMetric::DotProduct => query
                .values
                .iter()
                .zip(&candidate.values)
                .map(|(a, b)| a * b)
                .sum(),
            DistanceMetric::Euclidean => -query
                .values
                .iter()
                .zip(&candidate.values)
                .map(|(a, b)| (a - b) * (a - b))
                .sum::<f32>()
                .sqrt(),
        }
    }
}

impl InMemoryVectorStore {
    pub fn new(collection_name: impl Into<String>) -> Self {
        Self {
            collection_name: collection_name.into(),
            collection: RwLock::new(None),
        }
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    fn collection_name(&self) -> &str {
        &self.collection_name
    }

    async fn create_collection(&self, config: &CollectionConfig) -> Result<bool, VectorStoreError> {
        let mut collection = self.collection.write().await;
        if collection.is_some() {
            return Ok(false);
        }
        *collection = Some(Collection {
            dimensions: config.vector_dimensions,
            metric: config.distance_metric,
            points: Vec::new(),
        });
        tracing::debug!(collection = %self.collection_name, "collection_created");
        Ok(true)
    }

    async fn collection_exists(&self) -> Result<bool, VectorStoreError> {
        Ok(self.collection.read().await.is_some())
    }

    async fn get_collection_vector_size(&self) -> Result<Option<u64>, VectorStoreError> {
        Ok(self.collection.read().await.as_ref().map(|c| c.dimensions))
    }

    async fn delete_collection(&self) -> Result<(), VectorStoreError> {
        *self.collection.write().await = None;
        Ok(())
    }

    async fn count(&self) -> Result<u64, VectorStoreError> {
        self.collection
            .read()
            .await
            .as_ref()
            .map(|c| c.points.len() as u64)
            .ok_or_else(|| VectorStoreError::CollectionNotFound(self.collection_name.clone()))
    }

    async fn upsert(
        &self,
        chunks: &[Chunk],
        embeddings: &[Embedding],
    ) -> Result<(), VectorStoreError> {
        if chunks.len() != embeddings.len() {
            return Err(VectorStoreError::UpsertFailed(
                "chunks and embeddings count mismatch".to_string(),
            ));
        }

        let mut guard = self.collection.write().await;
        let collection = guard
            .as_mut()
            .ok_or_else(|| VectorStoreError::CollectionNotFound(self.collection_name.clone()))?;

        for (chunk, embedding) in chunks.iter().zip(embeddings) {
            if embedding.dimensions() as u64 != collection.dimensions {
                return Err(VectorStoreError::UpsertFailed(format!(
                    "expected {} dimensions, got {}",
                    collection.dimensions,
                    embedding.dimensions()
                )));
            }
            match collection.points.iter_mut().find(|(c, _)| c.id == chunk.id) {
                Some(point) => *point = (chunk.clone(), embedding.clone()),
                None => collection.points.push((chunk.clone(), embedding.clone())),
            }
        }
        Ok(())
    }

    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        let guard = self.collection.read().await;
        let collection = guard
            .as_ref()
            .ok_or_else(|| VectorStoreError::SearchFailed(format!(
                "collection {} does not exist",
                self.collection_name
            )))?;

        let mut results: Vec<SearchResult> = collection
            .points
            .iter()
            .map(|(chunk, candidate)| SearchResult {
                chunk: chunk.clone(),
                score: collection.score(embedding, candidate),
            })
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(top_k);
        Ok(results)
    }
}
