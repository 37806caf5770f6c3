//! AI provider adapter: a uniform `translate`/`generate` surface over the
//! Gemini and Claude backends.
//!
//! Configuration picks the primary provider and the fallback order; every
//! call carries an explicit timeout (short for translations, longer for
//! guidance generation). Responses are returned as raw text; callers must
//! run them through the JSON extractor before trusting any structure.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::config::Config;
use crate::language::Language;
use crate::retry::{with_retry_if, RetryConfig};

/// The closed set of AI backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    Claude,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::Claude => "claude",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// AI backend unreachable, unauthorized, rate-limited, or silent.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no AI provider is configured")]
    Unconfigured,

    #[error("{provider} request failed: {source}")]
    Http {
        provider: ProviderKind,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} API error ({status}): {body}")]
    Status {
        provider: ProviderKind,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("{provider} response contained no text")]
    EmptyResponse { provider: ProviderKind },
}

impl ProviderError {
    /// 429 and 5xx responses plus transport errors are worth retrying when
    /// the configuration allows more than one attempt; other client errors
    /// are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Unconfigured => false,
            ProviderError::Http { .. } => true,
            ProviderError::Status { status, .. } => {
                status.as_u16() == 429 || status.is_server_error()
            }
            ProviderError::EmptyResponse { .. } => false,
        }
    }
}

/// Adapter over the configured AI backends.
#[derive(Clone)]
pub struct AiProvider {
    client: reqwest::Client,
    config: Config,
    retry: RetryConfig,
}

impl AiProvider {
    pub fn new(config: &Config) -> Self {
        let retry = RetryConfig::new(config.ai_max_attempts, Duration::from_secs(1))
            .with_max_delay(Duration::from_secs(5));
        Self {
            client: reqwest::Client::new(),
            config: config.clone(),
            retry,
        }
    }

    /// Providers to try, primary first. Empty when no usable key exists.
    pub fn provider_order(&self) -> Vec<ProviderKind> {
        let gemini = self.config.gemini_api_key.is_some();
        let claude = self.config.anthropic_api_key.is_some();

        let preferred = match self.config.ai_provider.as_str() {
            "gemini" => [ProviderKind::Gemini, ProviderKind::Claude],
            "claude" => [ProviderKind::Claude, ProviderKind::Gemini],
            // auto: Gemini first, Claude as fallback
            _ => [ProviderKind::Gemini, ProviderKind::Claude],
        };

        preferred
            .into_iter()
            .filter(|kind| match kind {
                ProviderKind::Gemini => gemini,
                ProviderKind::Claude => claude,
            })
            .collect()
    }

    /// The provider a call would hit first, if any.
    pub fn active_provider(&self) -> Option<ProviderKind> {
        self.provider_order().into_iter().next()
    }

    /// Translate one piece of disaster-alert text. Returns the raw provider
    /// output, which is expected to embed `{"translation": ...}`.
    pub async fn translate_text(
        &self,
        text: &str,
        target_language: Language,
        context: Option<&str>,
    ) -> Result<String, ProviderError> {
        let prompt = build_translate_prompt(text, target_language, context);
        self.generate(&prompt, 200, self.config.ai_timeout_translate)
            .await
    }

    /// Free-form JSON generation (warning texts, safety guides). Uses the
    /// longer generation timeout.
    pub async fn generate_json(
        &self,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, ProviderError> {
        self.generate(prompt, max_tokens, self.config.ai_timeout_generate)
            .await
    }

    /// Run the prompt against each configured provider in order until one
    /// answers.
    async fn generate(
        &self,
        prompt: &str,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<String, ProviderError> {
        let order = self.provider_order();
        if order.is_empty() {
            return Err(ProviderError::Unconfigured);
        }

        let mut last_error = ProviderError::Unconfigured;
        for kind in order {
            let operation_name = format!("{} generate", kind);
            let result = with_retry_if(
                &self.retry,
                &operation_name,
                || self.call(kind, prompt, max_tokens, timeout),
                ProviderError::is_retryable,
            )
            .await;

            match result {
                Ok(text) => return Ok(text),
                Err(e) => {
                    warn!("{} failed, trying next provider: {}", kind, e);
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }

    async fn call(
        &self,
        kind: ProviderKind,
        prompt: &str,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<String, ProviderError> {
        match kind {
            ProviderKind::Gemini => self.call_gemini(prompt, max_tokens, timeout).await,
            ProviderKind::Claude => self.call_claude(prompt, max_tokens, timeout).await,
        }
    }

    async fn call_gemini(
        &self,
        prompt: &str,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<String, ProviderError> {
        let kind = ProviderKind::Gemini;
        let key = self
            .config
            .gemini_api_key
            .as_deref()
            .ok_or(ProviderError::Unconfigured)?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.gemini_base_url, self.config.gemini_model, key
        );

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_owned(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                max_output_tokens: max_tokens,
                temperature: if max_tokens <= 500 { 0.1 } else { 0.2 },
            },
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .timeout(timeout)
            .json(&request)
            .send()
            .await
            .map_err(|source| ProviderError::Http { provider: kind, source })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { provider: kind, status, body });
        }

        let parsed: GeminiResponse = response
            .json()
            .await
            .map_err(|source| ProviderError::Http { provider: kind, source })?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text.trim().to_owned())
            .filter(|text| !text.is_empty())
            .ok_or(ProviderError::EmptyResponse { provider: kind })
    }

    async fn call_claude(
        &self,
        prompt: &str,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<String, ProviderError> {
        let kind = ProviderKind::Claude;
        let key = self
            .config
            .anthropic_api_key
            .as_deref()
            .ok_or(ProviderError::Unconfigured)?;
        let url = format!("{}/v1/messages", self.config.anthropic_base_url);

        let request = ClaudeRequest {
            model: self.config.anthropic_model.clone(),
            max_tokens,
            messages: vec![ClaudeMessage {
                role: "user".to_string(),
                content: prompt.to_owned(),
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("X-API-Key", key)
            .header("anthropic-version", &self.config.anthropic_api_version)
            .timeout(timeout)
            .json(&request)
            .send()
            .await
            .map_err(|source| ProviderError::Http { provider: kind, source })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { provider: kind, status, body });
        }

        let parsed: ClaudeResponse = response
            .json()
            .await
            .map_err(|source| ProviderError::Http { provider: kind, source })?;

        parsed
            .content
            .into_iter()
            .next()
            .map(|block| block.text.trim().to_owned())
            .filter(|text| !text.is_empty())
            .ok_or(ProviderError::EmptyResponse { provider: kind })
    }
}

/// Build the translation prompt. The `context` hint lets callers flag
/// domain constraints (e.g., "this is an evacuation order").
fn build_translate_prompt(text: &str, target_language: Language, context: Option<&str>) -> String {
    let context_line = match context {
        Some(hint) => format!("\nContext: {}", hint),
        None => String::new(),
    };

    format!(
        r#"Translate this Japanese disaster-alert text to {}. Preserve severity wording, place names and numeric values exactly.{}

Return ONLY a JSON object with this exact shape (no markdown, no explanation):
{{"translation": "translated text"}}

Text: {}"#,
        target_language.name(),
        context_line,
        text
    )
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ClaudeMessage>,
}

#[derive(Debug, Serialize)]
struct ClaudeMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    #[serde(default)]
    content: Vec<ClaudeContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ClaudeContentBlock {
    text: String,
}
