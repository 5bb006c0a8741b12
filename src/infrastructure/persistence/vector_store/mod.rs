mod in_memory_vector_store;
mod qdrant_adapter;
mod vector_store_factory;

pub use in_memory_vector_store::InMemoryVectorStore;
pub use qdrant_adapter::QdrantAdapter;
pub use vector_store_factory::{VectorStoreFactory, VectorStores};
