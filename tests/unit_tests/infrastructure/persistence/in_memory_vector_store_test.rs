use nyaya::application::ports::{CollectionConfig, VectorStore, VectorStoreError};
use nyaya::domain::{Chunk, DocumentId, Embedding};
use nyaya::infrastructure::persistence::InMemoryVectorStore;

fn chunk(text: &str) -> Chunk {
    Chunk::new(text.to_string(), DocumentId::new(), Some(1), 0)
}

async fn store() -> InMemoryVectorStore {
    let store = InMemoryVectorStore::new("custom_doc");
    store
        .create_collection(&CollectionConfig::new(2))
        .await
        .unwrap();
    store
}

#[tokio::test]
async fn given_new_store_when_checking_then_collection_does_not_exist() {
    let store = InMemoryVectorStore::new("ipc_law");

    assert_eq!(store.collection_name(), "ipc_law");
    assert!(!store.collection_exists().await.unwrap());
    assert_eq!(store.get_collection_vector_size().await.unwrap(), None);
}

#[tokio::test]
async fn given_existing_collection_when_creating_again_then_returns_false() {
    let store = store().await;

    let created = store
        .create_collection(&CollectionConfig::new(2))
        .await
        .unwrap();

    assert!(!created);
    assert_eq!(store.get_collection_vector_size().await.unwrap(), Some(2));
}

#[tokio::test]
async fn given_points_when_searching_then_results_are_ordered_by_descending_score() {
    let store = store().await;
    store
        .upsert(
            &[chunk("east"), chunk("north"), chunk("north-east")],
            &[
                Embedding::new(vec![1.0, 0.0]),
                Embedding::new(vec![0.0, 1.0]),
                Embedding::new(vec![0.7, 0.7]),
            ],
        )
        .await
        .unwrap();

    let results = store
        .search(&Embedding::new(vec![0.0, 1.0]), 2)
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].chunk.text, "north");
    assert_eq!(results[1].chunk.text, "north-east");
    assert!(results[0].score > results[1].score);
}

#[tokio::test]
async fn given_mismatched_lengths_when_upserting_then_returns_upsert_failed() {
    let store = store().await;

    let result = store.upsert(&[chunk("a"), chunk("b")], &[Embedding::new(vec![1.0, 0.0])]).await;

    assert!(matches!(result, Err(VectorStoreError::UpsertFailed(_))));
}

#[tokio::test]
async fn given_wrong_dimension_when_upserting_then_returns_upsert_failed() {
    let store = store().await;

    let result = store
        .upsert(&[chunk("a")], &[Embedding::new(vec![1.0, 0.0, 0.0])])
        .await;

    assert!(matches!(result, Err(VectorStoreError::UpsertFailed(_))));
}

#[tokio::test]
async fn given_same_chunk_id_when_upserting_twice_then_point_is_replaced() {
    let store = store().await;
    let original = chunk("v1");
    let mut updated = original.clone();
    updated.text = "v2".to_string();

    store
        .upsert(&[original], &[Embedding::new(vec![1.0, 0.0])])
        .await
        .unwrap();
    store
        .upsert(&[updated], &[Embedding::new(vec![1.0, 0.0])])
        .await
        .unwrap();

    assert_eq!(store.count().await.unwrap(), 1);
    let results = store.search(&Embedding::new(vec![1.0, 0.0]), 5).await.unwrap();
    assert_eq!(results[0].chunk.text, "v2");
}

#[tokio::test]
async fn given_collection_when_deleting_twice_then_second_delete_is_a_no_op() {
    let store = store().await;

    store.delete_collection().await.unwrap();
    store.delete_collection().await.unwrap();

    assert!(!store.collection_exists().await.unwrap());
    assert!(matches!(
        store.count().await,
        Err(VectorStoreError::CollectionNotFound(_))
    ));
}
