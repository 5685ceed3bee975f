//! # scribe-inference
//!
//! Gemini LLM gateway for the scribe note library.
//!
//! This crate provides:
//! - `GeminiClient`, the production [`AiGateway`](scribe_core::AiGateway)
//!   implementation over the Google Generative Language API
//! - Pre-flight token budget enforcement and bounded retry with backoff
//! - A mock gateway for deterministic tests (feature `mock`)
//!
//! # Feature Flags
//!
//! - `mock`: Enable the mock gateway for tests in dependent crates
//! - `integration`: Enable tests that require a live Gemini API key
//!
//! # Example
//!
//! ```rust,no_run
//! use scribe_inference::GeminiClient;
//! use scribe_core::AiGateway;
//!
//! #[tokio::main]
//! async fn main() {
//!     let gateway = GeminiClient::from_env().unwrap();
//!     let healthy = gateway.health_check().await;
//!     println!("gateway healthy: {}", healthy);
//! }
//! ```

pub mod gemini;

// Mock gateway for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use scribe_core::*;

pub use gemini::{GeminiClient, GeminiConfig};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockAiGateway;
