//! Error types for scribe.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias using scribe's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for scribe operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Caller input violates a field constraint
    #[error("Validation error: {0}")]
    Validation(String),

    /// Identifier is not a well-formed UUID
    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// Resource not found (or not visible to this owner)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Archive requested on a note that is already archived
    #[error("Note is already archived: {0}")]
    AlreadyArchived(Uuid),

    /// Restore requested on a note that is not archived
    #[error("Note is not archived: {0}")]
    NotArchived(Uuid),

    /// Summarization requested on a note with no content
    #[error("Note has no content to summarize: {0}")]
    EmptyContent(Uuid),

    /// Pre-flight token estimate over budget
    #[error("Text exceeds token limit. Current: {estimated}, Max: {limit}")]
    TokenLimitExceeded { estimated: u32, limit: u32 },

    /// A single remote call attempt exceeded its deadline
    #[error("{operation} timed out after {secs}s")]
    Timeout { operation: String, secs: u64 },

    /// All retry attempts of a remote call failed
    #[error("{operation} failed after {attempts} attempts: {message}")]
    RetryExhausted {
        operation: String,
        attempts: u32,
        message: String,
    },

    /// Note content too large to summarize (token limit hit mid-flow)
    #[error("Note content is too large to summarize: {0}")]
    ContentTooLarge(Uuid),

    /// AI service failed after retries; the caller should try again later
    #[error("AI service is temporarily unavailable: {0}")]
    AiServiceUnavailable(String),

    /// Remote LLM call failed (non-retry-level detail)
    #[error("Inference error: {0}")]
    Inference(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_validation() {
        let err = Error::Validation("Title is required".to_string());
        assert_eq!(err.to_string(), "Validation error: Title is required");
    }

    #[test]
    fn test_error_display_invalid_id() {
        let err = Error::InvalidId("not-a-uuid".to_string());
        assert_eq!(err.to_string(), "Invalid id: not-a-uuid");
    }

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("Note 123".to_string());
        assert_eq!(err.to_string(), "Not found: Note 123");
    }

    #[test]
    fn test_error_display_already_archived() {
        let id = Uuid::nil();
        let err = Error::AlreadyArchived(id);
        assert_eq!(err.to_string(), format!("Note is already archived: {}", id));
    }

    #[test]
    fn test_error_display_not_archived() {
        let id = Uuid::nil();
        let err = Error::NotArchived(id);
        assert_eq!(err.to_string(), format!("Note is not archived: {}", id));
    }

    #[test]
    fn test_error_display_empty_content() {
        let id = Uuid::new_v4();
        let err = Error::EmptyContent(id);
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn test_error_display_token_limit() {
        let err = Error::TokenLimitExceeded {
            estimated: 13000,
            limit: 8000,
        };
        assert_eq!(
            err.to_string(),
            "Text exceeds token limit. Current: 13000, Max: 8000"
        );
    }

    #[test]
    fn test_error_display_timeout() {
        let err = Error::Timeout {
            operation: "generateText".to_string(),
            secs: 10,
        };
        assert_eq!(err.to_string(), "generateText timed out after 10s");
    }

    #[test]
    fn test_error_display_retry_exhausted() {
        let err = Error::RetryExhausted {
            operation: "generateSummary".to_string(),
            attempts: 3,
            message: "Request timeout".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "generateSummary failed after 3 attempts: Request timeout"
        );
    }

    #[test]
    fn test_error_display_content_too_large() {
        let id = Uuid::nil();
        let err = Error::ContentTooLarge(id);
        assert_eq!(
            err.to_string(),
            format!("Note content is too large to summarize: {}", id)
        );
    }

    #[test]
    fn test_error_display_ai_service_unavailable() {
        let err = Error::AiServiceUnavailable("please retry later".to_string());
        assert_eq!(
            err.to_string(),
            "AI service is temporarily unavailable: please retry later"
        );
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("GEMINI_API_KEY is not set in environment variables".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: GEMINI_API_KEY is not set in environment variables"
        );
    }

    #[test]
    fn test_error_display_inference() {
        let err = Error::Inference("model returned 500".to_string());
        assert_eq!(err.to_string(), "Inference error: model returned 500");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number");
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        match err {
            Error::Serialization(msg) => {
                assert!(!msg.is_empty());
            }
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_result_type_ok() {
        fn get_result() -> Result<i32> {
            Ok(42)
        }
        let result = get_result();
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_error_debug_format() {
        let err = Error::NotFound("test".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("NotFound"));
    }
}
