//! Mock AI gateway for deterministic testing.
//!
//! Implements [`AiGateway`] with canned responses, optional latency and
//! failure injection, and a call log so tests can assert exactly which
//! operations ran and how often.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scribe_inference::mock::MockAiGateway;
//!
//! #[tokio::test]
//! async fn test_with_mock_gateway() {
//!     let gateway = MockAiGateway::new().with_summary_response("- point one");
//!
//!     let response = gateway.generate_summary("note text").await.unwrap();
//!     assert_eq!(response.data, "- point one");
//!     assert_eq!(gateway.summary_call_count(), 1);
//! }
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use scribe_core::{
    defaults, estimate_tokens, validate_token_limit, AiGateway, AiResponse, Error, Result,
    TokenUsage,
};

use crate::gemini::parse_tags;

/// Mock AI gateway for testing.
#[derive(Clone)]
pub struct MockAiGateway {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    text_response: String,
    summary_response: String,
    /// Per-content summary overrides, checked before the default response.
    summary_mappings: HashMap<String, String>,
    /// Raw comma-separated tag line, parsed with the same rule as the real
    /// gateway.
    tags_response: String,
    model: String,
    healthy: bool,
    latency_ms: u64,
    failure_rate: f64,
}

/// One recorded gateway invocation.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub operation: String,
    pub input: String,
    pub timestamp: std::time::Instant,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            text_response: "Mock generated text".to_string(),
            summary_response: "- Mock summary point".to_string(),
            summary_mappings: HashMap::new(),
            tags_response: "notes, mock".to_string(),
            model: "mock-gemini".to_string(),
            healthy: true,
            latency_ms: 0,
            failure_rate: 0.0,
        }
    }
}

impl MockAiGateway {
    /// Create a new mock gateway with default configuration.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the response for `generate_text` requests.
    pub fn with_text_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).text_response = response.into();
        self
    }

    /// Set the response for `generate_summary` requests.
    pub fn with_summary_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).summary_response = response.into();
        self
    }

    /// Add a summary response for one specific note content.
    pub fn with_summary_mapping(
        mut self,
        content: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .summary_mappings
            .insert(content.into(), response.into());
        self
    }

    /// Set the raw comma-separated line returned for `generate_tags`.
    pub fn with_tags_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).tags_response = response.into();
        self
    }

    /// Set the model name reported in responses.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).model = model.into();
        self
    }

    /// Set whether `health_check` reports healthy.
    pub fn with_healthy(mut self, healthy: bool) -> Self {
        Arc::make_mut(&mut self.config).healthy = healthy;
        self
    }

    /// Set simulated latency for all operations.
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        Arc::make_mut(&mut self.config).latency_ms = latency_ms;
        self
    }

    /// Set failure rate (0.0 - 1.0) for testing error handling. Failures
    /// surface as retry exhaustion, matching the real gateway's terminal
    /// error shape.
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        Arc::make_mut(&mut self.config).failure_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.call_log.lock().unwrap().clear()
    }

    /// Number of `generate_text` calls.
    pub fn text_call_count(&self) -> usize {
        self.call_count("generate_text")
    }

    /// Number of `generate_summary` calls.
    pub fn summary_call_count(&self) -> usize {
        self.call_count("generate_summary")
    }

    /// Number of `generate_tags` calls.
    pub fn tags_call_count(&self) -> usize {
        self.call_count("generate_tags")
    }

    fn call_count(&self, operation: &str) -> usize {
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    fn log_call(&self, operation: &str, input: &str) {
        self.call_log.lock().unwrap().push(MockCall {
            operation: operation.to_string(),
            input: input.to_string(),
            timestamp: std::time::Instant::now(),
        });
    }

    fn should_fail(&self) -> bool {
        use rand::Rng;
        if self.config.failure_rate > 0.0 {
            rand::thread_rng().gen::<f64>() < self.config.failure_rate
        } else {
            false
        }
    }

    fn simulated_failure(&self, operation: &str) -> Error {
        Error::RetryExhausted {
            operation: operation.to_string(),
            attempts: defaults::AI_MAX_ATTEMPTS,
            message: "Simulated failure for testing".to_string(),
        }
    }

    async fn simulate_latency(&self) {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.latency_ms)).await;
        }
    }

    fn respond<T>(&self, data: T, prompt: &str, response_text: &str) -> AiResponse<T> {
        AiResponse {
            data,
            usage: TokenUsage::of(estimate_tokens(prompt), estimate_tokens(response_text)),
            model: self.config.model.clone(),
            timestamp: Utc::now(),
        }
    }
}

impl Default for MockAiGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiGateway for MockAiGateway {
    async fn generate_text(&self, prompt: &str) -> Result<AiResponse<String>> {
        self.log_call("generate_text", prompt);
        self.simulate_latency().await;

        validate_token_limit(prompt, defaults::MAX_PROMPT_TOKENS)?;
        if self.should_fail() {
            return Err(self.simulated_failure("generateText"));
        }

        let text = self.config.text_response.clone();
        Ok(self.respond(text.clone(), prompt, &text))
    }

    async fn generate_summary(&self, note_content: &str) -> Result<AiResponse<String>> {
        self.log_call("generate_summary", note_content);
        self.simulate_latency().await;

        validate_token_limit(note_content, defaults::MAX_PROMPT_TOKENS)?;
        if self.should_fail() {
            return Err(self.simulated_failure("generateSummary"));
        }

        let text = self
            .config
            .summary_mappings
            .get(note_content)
            .unwrap_or(&self.config.summary_response)
            .clone();
        Ok(self.respond(text.clone(), note_content, &text))
    }

    async fn generate_tags(&self, note_content: &str) -> Result<AiResponse<Vec<String>>> {
        self.log_call("generate_tags", note_content);
        self.simulate_latency().await;

        validate_token_limit(note_content, defaults::MAX_PROMPT_TOKENS)?;
        if self.should_fail() {
            return Err(self.simulated_failure("generateTags"));
        }

        let raw = self.config.tags_response.clone();
        Ok(self.respond(parse_tags(&raw), note_content, &raw))
    }

    async fn health_check(&self) -> bool {
        self.log_call("health_check", HEALTH_INPUT);
        self.simulate_latency().await;

        self.config.healthy && !self.should_fail()
    }
}

const HEALTH_INPUT: &str = "Hello";
