use std::sync::Arc;

use crate::application::ports::{VectorStore, VectorStoreError};
use crate::presentation::config::{VectorStoreProvider, VectorStoreSettings};

use super::{InMemoryVectorStore, QdrantAdapter};

/// One store per corpus.
pub struct VectorStores {
    pub ipc: Arc<dyn VectorStore>,
    pub custom: Arc<dyn VectorStore>,
}

pub struct VectorStoreFactory;

impl VectorStoreFactory {
    pub fn create(settings: &VectorStoreSettings) -> Result<VectorStores, VectorStoreError> {
        match settings.provider {
            VectorStoreProvider::Qdrant => {
                tracing::info!(url = %settings.url, "Connecting to Qdrant");
                let client = QdrantAdapter::connect(&settings.url)?;
                Ok(VectorStores {
                    ipc: Arc::new(QdrantAdapter::with_client(
                        Arc::clone(&client),
                        settings.ipc_collection.clone(),
                    )),
                    custom: Arc::new(QdrantAdapter::with_client(
                        client,
                        settings.custom_collection.clone(),
                    )),
                })
            }
            VectorStoreProvider::Memory => {
                tracing::info!("Using in-memory vector store");
                Ok(VectorStores {
                    ipc: Arc::new(InMemoryVectorStore::new(settings.ipc_collection.clone())),
                    custom: Arc::new(InMemoryVectorStore::new(
                        settings.custom_collection.clone(),
                    )),
                })
            }
        }
    }
}
