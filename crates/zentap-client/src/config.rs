//! Client configuration.

use std::time::Duration;

/// Configuration for a generation client. Provider shape (model name,
/// token budget, temperature) is configuration, not logic.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Endpoint URL (chat-completion endpoint or proxy endpoint).
    pub api_url: String,
    /// Bearer token; `None` for proxies that hold the credential.
    pub api_key: Option<String>,
    /// Provider model identifier.
    pub model: String,
    /// Completion token budget.
    pub max_tokens: u32,
    /// Sampling temperature, when the endpoint accepts one.
    pub temperature: Option<f64>,
    /// Transport-level request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: None,
            model: model.into(),
            max_tokens: 300,
            temperature: None,
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
