use std::path::{Path, PathBuf};

use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

pub const API_KEY_ENV_VAR: &str = "GROQ_API_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub vector_store: VectorStoreSettings,
    pub embeddings: EmbeddingsSettings,
    pub chunking: ChunkingSettings,
    pub retrieval: RetrievalSettings,
    pub llm: LlmSettings,
    pub documents: DocumentsSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_size_mb: usize,
}

impl ServerSettings {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_size_mb * 1024 * 1024
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VectorStoreSettings {
    pub provider: VectorStoreProvider,
    pub url: String,
    pub ipc_collection: String,
    pub custom_collection: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorStoreProvider {
    Qdrant,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingsSettings {
    pub provider: EmbeddingProvider,
    pub model: String,
    pub dimension: u64,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    Local,
    #[serde(rename = "openai")]
    OpenAi,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingSettings {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalSettings {
    pub top_k: usize,
    pub max_history_tokens: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub chat_model: String,
    pub temperature: f32,
    pub max_tokens: usize,
    pub secrets_file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Groq,
    #[serde(rename = "openai")]
    OpenAi,
    Custom,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentsSettings {
    pub ipc_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub json: bool,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: Option<String>,
}

impl Settings {
    /// Defaults, then `appsettings.toml`, then `appsettings.{env}.toml`, then
    /// `APP__SECTION__KEY` environment variables.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Self::builder(environment)?
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Built-in defaults only.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::with_defaults(Config::builder())?.build()?.try_deserialize()
    }

    fn builder(
        environment: Environment,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Ok(Self::with_defaults(Config::builder())?
            .add_source(File::with_name("appsettings").required(false))
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str()))
                    .required(false),
            ))
    }

    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8501)?
            .set_default("server.max_upload_size_mb", 50)?
            .set_default("vector_store.provider", "qdrant")?
            .set_default("vector_store.url", "http://localhost:6334")?
            .set_default("vector_store.ipc_collection", "ipc_law")?
            .set_default("vector_store.custom_collection", "custom_doc")?
            .set_default("embeddings.provider", "local")?
            .set_default("embeddings.model", "BAAI/bge-small-en-v1.5")?
            .set_default("embeddings.dimension", 384)?
            .set_default("chunking.chunk_size", 1000)?
            .set_default("chunking.chunk_overlap", 200)?
            .set_default("retrieval.top_k", 3)?
            .set_default("retrieval.max_history_tokens", 3072)?
            .set_default("llm.provider", "groq")?
            .set_default("llm.chat_model", "llama3-70b-8192")?
            .set_default("llm.temperature", 0.1)?
            .set_default("llm.max_tokens", 1024)?
            .set_default("llm.secrets_file", "secrets.toml")?
            .set_default("documents.ipc_path", "IPC_pdf.pdf")?
            .set_default("logging.json", false)
    }
}

impl LlmSettings {
    /// `llm.api_key`, then `GROQ_API_KEY` from the environment, then
    /// `GROQ_API_KEY` in the secrets file.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            return Ok(key.trim().to_string());
        }

        if let Ok(key) = std::env::var(API_KEY_ENV_VAR) {
            if !key.trim().is_empty() {
                return Ok(key.trim().to_string());
            }
        }

        read_secret(&self.secrets_file, API_KEY_ENV_VAR)?.ok_or_else(|| {
            ConfigError::Message(format!(
                "{} not found: set llm.api_key, the {} environment variable, or add it to {}",
                API_KEY_ENV_VAR,
                API_KEY_ENV_VAR,
                self.secrets_file.display()
            ))
        })
    }
}

fn read_secret(path: &Path, key: &str) -> Result<Option<String>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let secrets = Config::builder()
        .add_source(File::from(path).format(config::FileFormat::Toml))
        .build()?;

    Ok([key.to_string(), key.to_lowercase()]
        .iter()
        .find_map(|k| secrets.get_string(k).ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty()))
}
