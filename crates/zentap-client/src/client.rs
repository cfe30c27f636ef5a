//! Generation clients.

use async_trait::async_trait;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::response::ChatCompletionResponse;

/// One abstract generation call: prompt in, completion text out.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> ClientResult<String>;
}

#[derive(Serialize)]
struct ChatRequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequestBody<'a> {
    model: &'a str,
    messages: [ChatRequestMessage<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ProxyRequestBody<'a> {
    prompt: &'a str,
}

async fn read_completion(response: reqwest::Response) -> ClientResult<String> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let parsed: ChatCompletionResponse = response.json().await?;
    parsed.extract_text().ok_or(ClientError::EmptyCompletion)
}

// ── Provider Client ────────────────────────────────────────────────────

/// Talks to a chat-completion endpoint directly with bearer auth.
#[derive(Clone)]
pub struct ProviderClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl std::fmt::Debug for ProviderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderClient")
            .field("api_url", &self.config.api_url)
            .field("model", &self.config.model)
            .finish()
    }
}

impl ProviderClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        if config.api_url.is_empty() {
            return Err(ClientError::InvalidConfig("empty api_url".into()));
        }
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }
}

#[async_trait]
impl GenerationClient for ProviderClient {
    async fn generate(&self, prompt: &str) -> ClientResult<String> {
        let body = ChatRequestBody {
            model: &self.config.model,
            messages: [ChatRequestMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let mut request = self.http.post(&self.config.api_url).json(&body);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        tracing::debug!(url = %self.config.api_url, model = %self.config.model, "generation call");
        let response = request.send().await?;
        read_completion(response).await
    }
}

// ── Proxy Client ───────────────────────────────────────────────────────

/// Talks to the thin serverless proxy: posts `{prompt}`, receives the
/// provider-shaped response the proxy forwards.
#[derive(Clone)]
pub struct ProxyClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl std::fmt::Debug for ProxyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyClient")
            .field("api_url", &self.config.api_url)
            .finish()
    }
}

impl ProxyClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        if config.api_url.is_empty() {
            return Err(ClientError::InvalidConfig("empty api_url".into()));
        }
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }
}

#[async_trait]
impl GenerationClient for ProxyClient {
    async fn generate(&self, prompt: &str) -> ClientResult<String> {
        let body = ProxyRequestBody { prompt };
        tracing::debug!(url = %self.config.api_url, "proxy generation call");
        let response = self.http.post(&self.config.api_url).json(&body).send().await?;
        read_completion(response).await
    }
}
