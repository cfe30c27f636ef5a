//! Provider-shaped response parsing.
//!
//! Extraction is deliberately tolerant across common completion formats:
//! `choices[0].message.content`, then `choices[0].text`, then a top-level
//! `result` field.

use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ChatMessage>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Chat-completion response envelope.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub result: Option<String>,
}

impl ChatCompletionResponse {
    /// First completion's text, trimmed; `None` when every slot is empty.
    pub fn extract_text(&self) -> Option<String> {
        let first = self.choices.first();
        let text = first
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.clone())
            .or_else(|| first.and_then(|choice| choice.text.clone()))
            .or_else(|| self.result.clone())?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}
