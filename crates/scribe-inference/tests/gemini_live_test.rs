//! Integration tests against the real Gemini API.
//!
//! Disabled by default; they spend quota and need network access.
//!
//! ```bash
//! RUN_EXTERNAL_TESTS=1 \
//! GEMINI_API_KEY=... \
//! cargo test --package scribe-inference --features integration --test gemini_live_test -- --nocapture
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | RUN_EXTERNAL_TESTS | (unset) | Set to "1" or "true" to enable tests |
//! | GEMINI_API_KEY | (none) | API key, required |
//! | GEMINI_BASE_URL | https://generativelanguage.googleapis.com | API endpoint |
//! | GEMINI_MODEL | gemini-2.0-flash-001 | Generation model |

#![cfg(feature = "integration")]

use scribe_core::AiGateway;
use scribe_inference::GeminiClient;

/// Check if external integration tests should run.
/// Set RUN_EXTERNAL_TESTS=1 or RUN_EXTERNAL_TESTS=true to enable.
fn should_run_external_tests() -> bool {
    std::env::var("RUN_EXTERNAL_TESTS")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false)
}

/// Skip test with message if external tests are not enabled.
/// Returns true if the test should be skipped.
fn skip_if_external_tests_disabled(test_name: &str) -> bool {
    if !should_run_external_tests() {
        println!(
            "⏭️  Skipping {} - set RUN_EXTERNAL_TESTS=1 to enable external API tests",
            test_name
        );
        return true;
    }
    false
}

#[tokio::test]
async fn test_live_health_check() {
    if skip_if_external_tests_disabled("test_live_health_check") {
        return;
    }

    let client = GeminiClient::from_env().expect("GEMINI_API_KEY must be set");
    assert!(client.health_check().await, "Gemini should be reachable");
}

#[tokio::test]
async fn test_live_generate_text() {
    if skip_if_external_tests_disabled("test_live_generate_text") {
        return;
    }

    let client = GeminiClient::from_env().expect("GEMINI_API_KEY must be set");
    let response = client
        .generate_text("Reply with exactly one word: ping")
        .await
        .expect("generation should succeed");

    println!("model: {}, reply: {}", response.model, response.data);
    assert!(!response.data.trim().is_empty());
    assert!(response.usage.total_tokens > 0);
}

#[tokio::test]
async fn test_live_generate_tags() {
    if skip_if_external_tests_disabled("test_live_generate_tags") {
        return;
    }

    let client = GeminiClient::from_env().expect("GEMINI_API_KEY must be set");
    let response = client
        .generate_tags("Weekly grocery list: eggs, milk, flour, coffee beans.")
        .await
        .expect("tag generation should succeed");

    println!("tags: {:?}", response.data);
    assert!(response.data.len() <= 6);
}
