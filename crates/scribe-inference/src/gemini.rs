//! Gemini inference gateway implementation.
//!
//! Talks to the Google Generative Language API over HTTPS. Every generation
//! operation enforces the prompt token budget before any network traffic and
//! runs the remote call through [`RetryPolicy`], so callers see either a
//! final value or a final error.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use scribe_core::{
    defaults, estimate_tokens, validate_token_limit, AiGateway, AiResponse, Error, Result,
    RetryPolicy, TokenUsage,
};

/// Environment variable holding the Gemini API key.
pub const ENV_API_KEY: &str = "GEMINI_API_KEY";

/// Optional environment override for the API base URL.
pub const ENV_BASE_URL: &str = "GEMINI_BASE_URL";

/// Optional environment override for the generation model.
pub const ENV_MODEL: &str = "GEMINI_MODEL";

/// Instruction prepended to note content for summary generation.
/// The model answers in the language the note is written in.
const SUMMARY_INSTRUCTION: &str = "Summarize the following note as 3 to 6 concise \
bullet points. Write the summary in the same language as the note.";

/// Instruction prepended to note content for tag generation.
const TAGS_INSTRUCTION: &str = "Suggest at most 6 short tags for the following note. \
Reply with only the tags, separated by commas, in the same language as the note.";

/// Minimal prompt used by the liveness probe.
const HEALTH_PROMPT: &str = "Hello";

/// Configuration for [`GeminiClient`].
///
/// Everything except the API key has a sensible default; tests shrink the
/// retry timings to keep wire-level failure scenarios fast.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_attempts: u32,
    pub attempt_timeout_secs: u64,
    pub backoff_base_ms: u64,
}

impl GeminiConfig {
    /// Config with default endpoint, model, and retry schedule.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: defaults::GEMINI_BASE_URL.to_string(),
            model: defaults::GEMINI_MODEL.to_string(),
            max_attempts: defaults::AI_MAX_ATTEMPTS,
            attempt_timeout_secs: defaults::AI_ATTEMPT_TIMEOUT_SECS,
            backoff_base_ms: defaults::AI_BACKOFF_BASE_MS,
        }
    }

    /// Read configuration from `GEMINI_API_KEY` and the optional
    /// `GEMINI_BASE_URL` / `GEMINI_MODEL` overrides.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(ENV_API_KEY)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                Error::Config("GEMINI_API_KEY is not set in environment variables".to_string())
            })?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Ok(model) = std::env::var(ENV_MODEL) {
            config.model = model;
        }
        Ok(config)
    }
}

/// Gemini text generation gateway.
///
/// Constructed once at composition time and shared behind
/// `Arc<dyn AiGateway>`; the inner `reqwest::Client` pools connections and
/// is safe for concurrent use.
#[derive(Debug)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
    retry: RetryPolicy,
}

impl GeminiClient {
    /// Create a client from explicit configuration.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::Config(
                "GEMINI_API_KEY is not set in environment variables".to_string(),
            ));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let retry = RetryPolicy {
            max_attempts: config.max_attempts,
            attempt_timeout: Duration::from_secs(config.attempt_timeout_secs),
            backoff_base: Duration::from_millis(config.backoff_base_ms),
        };

        Ok(Self {
            client,
            config,
            retry,
        })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    /// The model this client generates with.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// One raw generateContent call, without retry.
    async fn generate_internal(
        &self,
        prompt: &str,
        max_output_tokens: u32,
        temperature: f64,
    ) -> Result<String> {
        let start = Instant::now();

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens,
                temperature,
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Inference(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Inference(format!(
                "Gemini returned {}: {}",
                status, body
            )));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse response: {}", e)))?;

        let text = result
            .into_text()
            .ok_or_else(|| Error::Inference("Gemini response contained no text".to_string()))?;

        let elapsed = start.elapsed().as_millis();
        debug!(
            response_len = text.len(),
            duration_ms = elapsed as u64,
            "Generation complete"
        );
        if elapsed > defaults::SLOW_CALL_THRESHOLD_MS {
            warn!(
                duration_ms = elapsed as u64,
                prompt_len = prompt.len(),
                slow = true,
                "Slow generation call"
            );
        }
        Ok(text)
    }

    /// Shared path for all generation operations: token budget check, then
    /// the retried remote call, then usage accounting.
    async fn generate_with_retry(
        &self,
        operation: &str,
        prompt: &str,
        max_output_tokens: u32,
        temperature: f64,
    ) -> Result<AiResponse<String>> {
        validate_token_limit(prompt, defaults::MAX_PROMPT_TOKENS)?;

        let text = self
            .retry
            .execute(operation, || {
                self.generate_internal(prompt, max_output_tokens, temperature)
            })
            .await?;

        let usage = TokenUsage::of(estimate_tokens(prompt), estimate_tokens(&text));
        debug!(
            op = operation,
            prompt_tokens = usage.prompt_tokens,
            response_tokens = usage.response_tokens,
            "Usage estimated"
        );

        Ok(AiResponse {
            data: text,
            usage,
            model: self.config.model.clone(),
            timestamp: Utc::now(),
        })
    }
}

#[async_trait]
impl AiGateway for GeminiClient {
    #[instrument(skip(self, prompt), fields(subsystem = "inference", component = "gemini", op = "generate_text", model = %self.config.model, prompt_len = prompt.len()))]
    async fn generate_text(&self, prompt: &str) -> Result<AiResponse<String>> {
        self.generate_with_retry(
            "generateText",
            prompt,
            defaults::TEXT_MAX_OUTPUT_TOKENS,
            defaults::TEXT_TEMPERATURE,
        )
        .await
    }

    #[instrument(skip(self, note_content), fields(subsystem = "inference", component = "gemini", op = "generate_summary", model = %self.config.model, content_len = note_content.len()))]
    async fn generate_summary(&self, note_content: &str) -> Result<AiResponse<String>> {
        let prompt = format!("{}\n\n{}", SUMMARY_INSTRUCTION, note_content);
        self.generate_with_retry(
            "generateSummary",
            &prompt,
            defaults::SUMMARY_MAX_OUTPUT_TOKENS,
            defaults::SUMMARY_TEMPERATURE,
        )
        .await
    }

    #[instrument(skip(self, note_content), fields(subsystem = "inference", component = "gemini", op = "generate_tags", model = %self.config.model, content_len = note_content.len()))]
    async fn generate_tags(&self, note_content: &str) -> Result<AiResponse<Vec<String>>> {
        let prompt = format!("{}\n\n{}", TAGS_INSTRUCTION, note_content);
        let response = self
            .generate_with_retry(
                "generateTags",
                &prompt,
                defaults::TAGS_MAX_OUTPUT_TOKENS,
                defaults::TAGS_TEMPERATURE,
            )
            .await?;

        let tags = parse_tags(&response.data);
        debug!(tag_count = tags.len(), "Tags parsed");
        Ok(AiResponse {
            data: tags,
            usage: response.usage,
            model: response.model,
            timestamp: response.timestamp,
        })
    }

    #[instrument(skip(self), fields(subsystem = "inference", component = "gemini", op = "health_check", model = %self.config.model))]
    async fn health_check(&self) -> bool {
        match self
            .generate_with_retry(
                "healthCheck",
                HEALTH_PROMPT,
                defaults::HEALTH_MAX_OUTPUT_TOKENS,
                defaults::HEALTH_TEMPERATURE,
            )
            .await
        {
            Ok(response) => !response.data.trim().is_empty(),
            Err(e) => {
                warn!(error = %e, "Gemini health check failed");
                false
            }
        }
    }
}

/// Split a comma-separated model response into at most six clean tags.
///
/// Empty pieces are dropped and order is preserved; a blank response yields
/// an empty list rather than an error.
pub(crate) fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .take(defaults::MAX_TAGS)
        .map(str::to_string)
        .collect()
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f64,
}

/// Response from the `generateContent` endpoint. Only the first candidate's
/// first part is consumed.
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

impl GenerateContentResponse {
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .next()
            .map(|part| part.text)
    }
}
