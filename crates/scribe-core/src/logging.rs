//! Structured logging schema and field name constants for scribe.
//!
//! All crates use these constants for consistent structured logging fields.
//! This ensures log aggregation tools (Loki, Elasticsearch) can query by
//! standardized field names across every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Failed operation surfaced to the caller (retry exhaustion, storage failure) |
//! | WARN  | Failed attempt about to be retried, slow calls, lifecycle conflicts |
//! | INFO  | Lifecycle events (pool startup), operation completions |
//! | DEBUG | Decision points, token counts, durations, config choices |
//! | TRACE | Per-item iteration, high-volume data |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "db", "inference", "core"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "notes", "summaries", "gemini", "pool", "retry"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "create", "archive", "generate_summary", "health_check"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Note UUID being operated on.
pub const NOTE_ID: &str = "note_id";

/// Opaque owner identifier scoping the operation.
pub const OWNER_ID: &str = "owner_id";

/// Search query text.
pub const QUERY: &str = "query";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a list or search.
pub const RESULT_COUNT: &str = "result_count";

/// Estimated prompt token count.
pub const PROMPT_TOKENS: &str = "prompt_tokens";

/// Estimated response token count.
pub const RESPONSE_TOKENS: &str = "response_tokens";

/// Retry attempt number, 1-based.
pub const ATTEMPT: &str = "attempt";

// ─── Database fields ───────────────────────────────────────────────────────

/// Number of active connections in the pool.
pub const POOL_SIZE: &str = "pool_size";

/// Number of idle connections in the pool.
pub const POOL_IDLE: &str = "pool_idle";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for generation.
pub const MODEL: &str = "model";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Slow operation threshold exceeded.
pub const SLOW: &str = "slow";
