use std::sync::Arc;

use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;

use crate::application::ports::{Embedder, EmbedderError};
use crate::domain::Embedding;

/// How token vectors are reduced to one sentence vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pooling {
    /// Hidden state of the leading `[CLS]` token (BGE family).
    Cls,
    /// Attention-masked average over all tokens (sentence-transformers MiniLM family).
    Mean,
}

impl Pooling {
    pub fn for_model(model_id: &str) -> Self {
        if model_id.to_ascii_lowercase().contains("bge") {
            Pooling::Cls
        } else {
            Pooling::Mean
        }
    }
}

/// BERT-style sentence embedder running in-process on candle. Inference runs
/// on the blocking pool.
pub struct LocalCandleEmbedder {
    inner: Arc<BertEncoder>,
}

struct BertEncoder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    pooling: Pooling,
}

impl LocalCandleEmbedder {
    pub fn new(model_id: &str) -> Result<Self, EmbedderError> {
        let device = Device::new_metal(0).unwrap_or(Device::Cpu);
        let pooling = Pooling::for_model(model_id);

        tracing::info!(
            device = ?device,
            model = model_id,
            pooling = ?pooling,
            "Initializing local Candle embedding model"
        );

        let api = Api::new().map_err(|e| EmbedderError::ModelLoadFailed(e.to_string()))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| EmbedderError::ModelLoadFailed(format!("config.json: {}", e)))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| EmbedderError::ModelLoadFailed(format!("tokenizer.json: {}", e)))?;
        let weights_path = repo
            .get("model.safetensors")
            .map_err(|e| EmbedderError::ModelLoadFailed(format!("model.safetensors: {}", e)))?;

        let config_contents = std::fs::read_to_string(&config_path)
            .map_err(|e| EmbedderError::ModelLoadFailed(format!("read config: {}", e)))?;
        let config: BertConfig = serde_json::from_str(&config_contents)
            .map_err(|e| EmbedderError::ModelLoadFailed(format!("parse config: {}", e)))?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| EmbedderError::ModelLoadFailed(format!("tokenizer: {}", e)))?;

        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: config.max_position_embeddings,
                ..Default::default()
            }))
            .map_err(|e| EmbedderError::ModelLoadFailed(format!("truncation config: {}", e)))?;

        let dtype = if device.is_cpu() {
            DType::F32
        } else {
            DType::F16
        };

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], dtype, &device)
                .map_err(|e| EmbedderError::ModelLoadFailed(format!("weights: {}", e)))?
        };

        let model = BertModel::load(vb, &config)
            .map_err(|e| EmbedderError::ModelLoadFailed(format!("model: {}", e)))?;

        tracing::info!("Local Candle embedding model loaded");

        Ok(Self {
            inner: Arc::new(BertEncoder {
                model,
                tokenizer,
                device,
                pooling,
            }),
        })
    }

    async fn encode(&self, texts: Vec<String>) -> Result<Vec<Embedding>, EmbedderError> {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || inner.encode(texts))
            .await
            .map_err(|e| EmbedderError::InferenceFailed(format!("task join error: {e}")))?
    }
}

fn inference_error(e: candle_core::Error) -> EmbedderError {
    EmbedderError::InferenceFailed(e.to_string())
}

impl BertEncoder {
    fn encode(&self, texts: Vec<String>) -> Result<Vec<Embedding>, EmbedderError> {
        let batch_size = texts.len();
        let encodings = self
            .tokenizer
            .encode_batch(texts, true)
            .map_err(|e| EmbedderError::InferenceFailed(format!("tokenization: {}", e)))?;

        let max_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0);

        let mut input_ids = Vec::with_capacity(batch_size * max_len);
        let mut type_ids = Vec::with_capacity(batch_size * max_len);
        let mut attention = Vec::with_capacity(batch_size * max_len);

        for encoding in &encodings {
            let pad_len = max_len - encoding.get_ids().len();

            input_ids.extend_from_slice(encoding.get_ids());
            input_ids.extend(std::iter::repeat_n(0u32, pad_len));

            type_ids.extend_from_slice(encoding.get_type_ids());
            type_ids.extend(std::iter::repeat_n(0u32, pad_len));

            attention.extend_from_slice(encoding.get_attention_mask());
            attention.extend(std::iter::repeat_n(0u32, pad_len));
        }

        let shape = (batch_size, max_len);
        let input_ids = Tensor::from_vec(input_ids, shape, &self.device).map_err(inference_error)?;
        let token_type_ids =
            Tensor::from_vec(type_ids, shape, &self.device).map_err(inference_error)?;
        let attention_mask =
            Tensor::from_vec(attention, shape, &self.device).map_err(inference_error)?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .and_then(|t| t.to_dtype(DType::F32))
            .map_err(inference_error)?;

        let pooled = match self.pooling {
            Pooling::Cls => hidden
                .narrow(1, 0, 1)
                .and_then(|t| t.squeeze(1))
                .map_err(inference_error)?,
            Pooling::Mean => {
                let mask = attention_mask
                    .to_dtype(DType::F32)
                    .map_err(inference_error)?;
                let summed = hidden
                    .broadcast_mul(&mask.unsqueeze(2).map_err(inference_error)?)
                    .and_then(|t| t.sum(1))
                    .map_err(inference_error)?;
                let counts = mask
                    .sum(1)
                    .and_then(|t| t.unsqueeze(1))
                    .map_err(inference_error)?;
                summed.broadcast_div(&counts).map_err(inference_error)?
            }
        };

        let rows: Vec<Vec<f32>> = pooled.to_vec2().map_err(inference_error)?;
        Ok(rows.into_iter().map(Embedding::normalized).collect())
    }
}

#[async_trait]
impl Embedder for LocalCandleEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError> {
        self.encode(vec![text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| EmbedderError::InferenceFailed("empty result".to_string()))
    }

    #[tracing::instrument(skip(self, texts), fields(count = texts.len()))]
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.encode(texts.iter().map(|t| (*t).to_string()).collect())
            .await
    }
}
