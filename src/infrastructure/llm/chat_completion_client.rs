use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{ChatPrompt, LlmClient, LlmClientError};
use crate::presentation::config::{LlmProvider, LlmSettings};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for any OpenAI-compatible `/chat/completions` endpoint (Groq,
/// OpenAI, or a self-hosted gateway).
pub struct ChatCompletionClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: usize,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: usize,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: String,
        model: String,
        max_tokens: usize,
        temperature: f32,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            model,
            max_tokens,
            temperature,
        }
    }

    pub fn from_settings(settings: &LlmSettings, api_key: String) -> Result<Self, LlmClientError> {
        let base_url = match settings.provider {
            LlmProvider::Groq => "https://api.groq.com/openai/v1".to_string(),
            LlmProvider::OpenAi => "https://api.openai.com/v1".to_string(),
            LlmProvider::Custom => settings.base_url.clone().ok_or_else(|| {
                LlmClientError::InvalidConfiguration(
                    "llm.base_url is required for the custom provider".to_string(),
                )
            })?,
        };

        if api_key.trim().is_empty() {
            return Err(LlmClientError::InvalidConfiguration(
                "LLM API key is empty".to_string(),
            ));
        }

        tracing::info!(
            provider = ?settings.provider,
            model = %settings.chat_model,
            "Chat completion client configured"
        );

        Ok(Self::new(
            base_url,
            api_key,
            settings.chat_model.clone(),
            settings.max_tokens,
            settings.temperature,
        ))
    }
}

#[async_trait]
impl LlmClient for ChatCompletionClient {
    #[tracing::instrument(skip(self, prompt), fields(model = %self.model))]
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, LlmClientError> {
        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        let answer = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmClientError::InvalidResponse("empty choices".to_string()))?;

        tracing::debug!(answer_chars = answer.len(), "Completion received");
        Ok(answer)
    }
}
