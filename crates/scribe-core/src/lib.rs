//! # scribe-core
//!
//! Core types, traits, and abstractions for the scribe note library.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the scribe storage and inference crates depend on.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod retry;
pub mod tokenizer;
pub mod traits;
pub mod uuid_utils;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use retry::RetryPolicy;
pub use tokenizer::{estimate_tokens, validate_token_limit};
pub use traits::*;
pub use uuid_utils::{is_v7, new_v7, parse_id};
