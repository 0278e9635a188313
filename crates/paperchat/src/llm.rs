//! Chat-completion client abstraction.
//!
//! The orchestrator only needs `complete(prompt) -> text`; everything else
//! (endpoints, auth, response shapes) stays behind [`CompletionClient`].
//! There is no automatic retry here: the request timeout bounds model-call
//! latency and a timeout surfaces to the caller as a generation failure.

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::config::LlmConfig;

const OPENAI_DEFAULT_BASE: &str = "https://api.openai.com/v1";
const OLLAMA_DEFAULT_URL: &str = "http://localhost:11434";

/// Trait for language-model completion backends.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Model identifier (e.g. `"deepseek-chat"`).
    fn model_name(&self) -> &str;
    /// Complete a prompt, returning the raw model text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Create the appropriate [`CompletionClient`] based on configuration.
pub fn create_client(config: &LlmConfig) -> Result<Box<dyn CompletionClient>> {
    match config.provider.as_str() {
        "openai" => Ok(Box::new(OpenAiChatClient::new(config)?)),
        "ollama" => Ok(Box::new(OllamaChatClient::new(config)?)),
        other => bail!("Unknown llm provider: {}", other),
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Client for OpenAI-compatible `/chat/completions` endpoints.
///
/// Covers OpenAI and DeepSeek; select the vendor with `llm.base_url` and
/// `llm.api_key_env` in the config.
pub struct OpenAiChatClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl OpenAiChatClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            anyhow::anyhow!("{} environment variable not set", config.api_key_env)
        })?;

        let base = config
            .base_url
            .as_deref()
            .unwrap_or(OPENAI_DEFAULT_BASE)
            .trim_end_matches('/')
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            url: format!("{}/chat/completions", base),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAiChatClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let mut body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": prompt }
            ],
            "temperature": self.temperature,
        });
        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        let resp = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body_text = resp.text().await.unwrap_or_default();
            bail!("Chat API error {}: {}", status, body_text);
        }

        let parsed: ChatResponse = resp.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        Ok(content)
    }
}

/// Client for a local Ollama host (`POST /api/chat`).
pub struct OllamaChatClient {
    client: reqwest::Client,
    model: String,
    url: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl OllamaChatClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let base = config
            .base_url
            .as_deref()
            .unwrap_or(OLLAMA_DEFAULT_URL)
            .trim_end_matches('/')
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            model: config.model.clone(),
            url: format!("{}/api/chat", base),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl CompletionClient for OllamaChatClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let mut options = serde_json::json!({ "temperature": self.temperature });
        if let Some(max_tokens) = self.max_tokens {
            options["num_predict"] = serde_json::json!(max_tokens as i64);
        }

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": prompt }
            ],
            "stream": false,
            "options": options,
        });

        let resp = self.client.post(&self.url).json(&body).send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body_text = resp.text().await.unwrap_or_default();
            bail!("Ollama chat error {}: {}", status, body_text);
        }

        let json: serde_json::Value = resp.json().await?;
        let content = json["message"]["content"].as_str().unwrap_or("").to_string();
        Ok(content)
    }
}
