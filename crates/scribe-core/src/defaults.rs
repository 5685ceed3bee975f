//! Centralized default constants for the scribe system.
//!
//! **This module is the single source of truth** for all shared default values.
//! All crates should reference these constants instead of defining their own
//! magic numbers.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section and document the rationale for the chosen value.

// =============================================================================
// TOKEN BUDGET
// =============================================================================

/// Maximum estimated tokens accepted for any single prompt. Shared by every
/// gateway operation; enforced before the request leaves the process.
pub const MAX_PROMPT_TOKENS: u32 = 8000;

/// Multiplier applied to the whitespace word count when estimating tokens.
/// Compensates for scripts that are not whitespace-delimited.
pub const TOKEN_ESTIMATE_MULTIPLIER: f64 = 1.3;

// =============================================================================
// RETRY
// =============================================================================

/// Attempts per remote LLM call, including the first.
pub const AI_MAX_ATTEMPTS: u32 = 3;

/// Per-attempt deadline in seconds, measured from attempt start.
pub const AI_ATTEMPT_TIMEOUT_SECS: u64 = 10;

/// Base delay in milliseconds for exponential backoff between attempts.
/// Delay before attempt n+1 is `base * 2^(n-1)`: 1s, then 2s.
pub const AI_BACKOFF_BASE_MS: u64 = 1000;

// =============================================================================
// GATEWAY
// =============================================================================

/// Default generation model identifier.
pub const GEMINI_MODEL: &str = "gemini-2.0-flash-001";

/// Default Generative Language API base URL.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Output cap and sampling temperature for free-text generation.
pub const TEXT_MAX_OUTPUT_TOKENS: u32 = 1000;
pub const TEXT_TEMPERATURE: f64 = 0.7;

/// Output cap and sampling temperature for note summarization.
pub const SUMMARY_MAX_OUTPUT_TOKENS: u32 = 500;
pub const SUMMARY_TEMPERATURE: f64 = 0.5;

/// Output cap and sampling temperature for tag generation.
pub const TAGS_MAX_OUTPUT_TOKENS: u32 = 200;
pub const TAGS_TEMPERATURE: f64 = 0.3;

/// Output cap and sampling temperature for the health-check probe.
pub const HEALTH_MAX_OUTPUT_TOKENS: u32 = 10;
pub const HEALTH_TEMPERATURE: f64 = 0.1;

/// Maximum tags returned by tag generation, after trimming.
pub const MAX_TAGS: usize = 6;

/// An attempt slower than this is logged with `slow = true`.
pub const SLOW_CALL_THRESHOLD_MS: u128 = 5000;

// =============================================================================
// NOTE FIELDS
// =============================================================================

/// Maximum title length in characters.
pub const TITLE_MAX_LEN: usize = 200;

/// Maximum content length in characters.
pub const CONTENT_MAX_LEN: usize = 10_000;

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page number for list endpoints.
pub const DEFAULT_PAGE: i64 = 1;

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Maximum page size accepted from callers.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Maximum search query length in characters.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;
