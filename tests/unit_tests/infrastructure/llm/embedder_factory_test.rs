use nyaya::infrastructure::llm::{EmbedderFactory, EmbedderFactoryError, Pooling};
use nyaya::presentation::config::{EmbeddingProvider, EmbeddingsSettings};

fn openai_settings(api_key: Option<&str>) -> EmbeddingsSettings {
    EmbeddingsSettings {
        provider: EmbeddingProvider::OpenAi,
        model: "text-embedding-3-small".to_string(),
        dimension: 1536,
        api_key: api_key.map(String::from),
        base_url: None,
    }
}

#[test]
fn given_openai_provider_with_key_when_creating_then_succeeds() {
    let result = EmbedderFactory::create(&openai_settings(Some("sk-test-key")));

    assert!(result.is_ok());
}

#[test]
fn given_openai_provider_without_key_when_creating_then_returns_missing_api_key() {
    let result = EmbedderFactory::create(&openai_settings(None));

    assert!(matches!(result, Err(EmbedderFactoryError::MissingApiKey)));
}

#[test]
fn given_openai_provider_with_empty_key_when_creating_then_returns_missing_api_key() {
    let result = EmbedderFactory::create(&openai_settings(Some("")));

    assert!(matches!(result, Err(EmbedderFactoryError::MissingApiKey)));
}

#[test]
fn given_bge_model_when_choosing_pooling_then_uses_cls() {
    assert_eq!(Pooling::for_model("BAAI/bge-small-en-v1.5"), Pooling::Cls);
}

#[test]
fn given_minilm_model_when_choosing_pooling_then_uses_mean() {
    assert_eq!(
        Pooling::for_model("sentence-transformers/all-MiniLM-L6-v2"),
        Pooling::Mean
    );
}
