//! Heuristic token estimation for pre-flight budget checks.
//!
//! The estimate is whitespace word count scaled by
//! [`defaults::TOKEN_ESTIMATE_MULTIPLIER`], rounded up. It exists to reject
//! oversized prompts before they reach the network and to report usage after
//! a response; it is not an exact tokenizer and must never be load-bearing
//! for billing.

use crate::defaults;
use crate::error::{Error, Result};

/// Estimate the token cost of `text`.
///
/// Splits on whitespace runs, counts the words, and scales by 1.3 to
/// compensate for scripts that are not whitespace-delimited. Empty and
/// whitespace-only text estimates to zero.
///
/// # Example
///
/// ```
/// use scribe_core::tokenizer::estimate_tokens;
///
/// assert_eq!(estimate_tokens("Hello world"), 3); // ceil(2 * 1.3)
/// assert_eq!(estimate_tokens(""), 0);
/// ```
pub fn estimate_tokens(text: &str) -> u32 {
    let words = text.split_whitespace().count();
    (words as f64 * defaults::TOKEN_ESTIMATE_MULTIPLIER).ceil() as u32
}

/// Fail with [`Error::TokenLimitExceeded`] when the estimate for `text` is
/// over `limit`. An estimate exactly at the limit passes.
pub fn validate_token_limit(text: &str, limit: u32) -> Result<()> {
    let estimated = estimate_tokens(text);
    if estimated > limit {
        return Err(Error::TokenLimitExceeded { estimated, limit });
    }
    Ok(())
}
