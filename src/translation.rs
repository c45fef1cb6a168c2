//! Translation Provider: turns base-language FAQ text into a target language.
//!
//! The service talks to providers through the `Translator` trait. The shipped
//! adapter calls an OpenAI-compatible chat completions endpoint. Each call is
//! made once, without retry or timeout.

use crate::config::Config;
use crate::i18n::{Language, TranslationValidator};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("failed to reach translation provider: {0}")]
    Request(#[from] reqwest::Error),

    #[error("translation provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("translation provider response contained no text")]
    EmptyResponse,
}

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from the base language into `target`.
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslationError>;
}

/// OpenAI Chat Completion request for translation
#[derive(Debug, Serialize)]
struct TranslationRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Check if a model is a reasoning model that doesn't support temperature
fn is_reasoning_model(model: &str) -> bool {
    model.starts_with("gpt-5")
        || model.starts_with("o1")
        || model.starts_with("o3")
        || model.starts_with("o4")
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

/// Build the system prompt for translation
fn build_translation_system_prompt(target_language: &str) -> String {
    format!(
        r#"You are a professional translator. Translate the user's text from English to {}.

## Rules
- Reply with the translation only: no preamble, no quotes, no notes.
- Preserve all HTML tags and attributes exactly; translate only the text between tags.
- Do not translate URLs, email addresses, product names or code.
- Keep the tone of a helpful FAQ: clear, polite and concise."#,
        target_language
    )
}

/// Translator backed by an OpenAI-compatible chat completions API.
pub struct OpenAiTranslator {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiTranslator {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            api_url: config.openai_api_url.clone(),
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
        }
    }

    fn build_request(&self, text: &str, target: Language) -> TranslationRequest {
        TranslationRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: build_translation_system_prompt(target.name()),
                },
                Message {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
            // Reasoning models don't support temperature
            temperature: if is_reasoning_model(&self.model) {
                None
            } else {
                Some(0.2)
            },
        }
    }
}

#[async_trait]
impl Translator for OpenAiTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslationError> {
        if target.is_canonical() {
            return Ok(text.to_string());
        }

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&self.build_request(text, target))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(TranslationError::Provider { status, body });
        }

        let chat_response: ChatResponse = response.json().await?;
        let translated = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or(TranslationError::EmptyResponse)?;
        if translated.is_empty() && !text.trim().is_empty() {
            return Err(TranslationError::EmptyResponse);
        }

        let validation = TranslationValidator::validate(text, &translated);
        if !validation.is_clean() {
            warn!(
                "Translation validation issues for {} ({}): errors={:?} warnings={:?}",
                target.name(),
                target.code(),
                validation.errors,
                validation.warnings
            );
        }

        Ok(translated)
    }
}
