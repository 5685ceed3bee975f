//! Core data models for scribe.
//!
//! These types are shared across all scribe crates and represent the core
//! domain entities: notes, their summaries, and the value objects exchanged
//! with the AI gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults;
use crate::error::{Error, Result};

// =============================================================================
// NOTE TYPES
// =============================================================================

/// A user-owned note with an archival flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub owner_id: String,
    pub title: String,
    pub content: String,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Title and content supplied by the caller for create, update, and
/// auto-save operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Validate field constraints, reporting the first violated one.
    ///
    /// Titles must be non-blank and at most 200 characters; content is
    /// optional but capped at 10,000 characters.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("Title is required".to_string()));
        }
        if self.title.chars().count() > defaults::TITLE_MAX_LEN {
            return Err(Error::Validation(format!(
                "Title must be at most {} characters",
                defaults::TITLE_MAX_LEN
            )));
        }
        if self.content.chars().count() > defaults::CONTENT_MAX_LEN {
            return Err(Error::Validation(format!(
                "Content must be at most {} characters",
                defaults::CONTENT_MAX_LEN
            )));
        }
        Ok(())
    }
}

/// Sort key for note listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    CreatedAt,
    #[default]
    UpdatedAt,
    Title,
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreatedAt => write!(f, "createdAt"),
            Self::UpdatedAt => write!(f, "updatedAt"),
            Self::Title => write!(f, "title"),
        }
    }
}

impl std::str::FromStr for SortBy {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "createdAt" | "created_at" => Ok(Self::CreatedAt),
            "updatedAt" | "updated_at" => Ok(Self::UpdatedAt),
            "title" => Ok(Self::Title),
            _ => Err(format!("Invalid sort key: {}", s)),
        }
    }
}

/// Sort direction for note listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(format!("Invalid sort order: {}", s)),
        }
    }
}

/// Paging, sorting, and archive-filter options for note listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListOptions {
    pub page: i64,
    pub limit: i64,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    /// When true, list archived notes instead of active ones.
    pub archived: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page: defaults::DEFAULT_PAGE,
            limit: defaults::DEFAULT_PAGE_LIMIT,
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
            archived: false,
        }
    }
}

impl ListOptions {
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_sort(mut self, sort_by: SortBy, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }

    pub fn with_archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }

    /// Validate paging bounds: `page >= 1`, `1 <= limit <= 100`.
    pub fn validate(&self) -> Result<()> {
        if self.page < defaults::DEFAULT_PAGE {
            return Err(Error::Validation("Page must be at least 1".to_string()));
        }
        if self.limit < 1 || self.limit > defaults::MAX_PAGE_LIMIT {
            return Err(Error::Validation(format!(
                "Limit must be between 1 and {}",
                defaults::MAX_PAGE_LIMIT
            )));
        }
        Ok(())
    }
}

/// Derived paging metadata returned with every listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_count: i64,
    pub limit: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    /// Compute metadata for a page: `total_pages = ceil(total_count / limit)`,
    /// `has_next_page = page < total_pages`, `has_prev_page = page > 1`.
    pub fn compute(page: i64, limit: i64, total_count: i64) -> Self {
        let total_pages = if limit > 0 {
            (total_count + limit - 1) / limit
        } else {
            0
        };
        Self {
            current_page: page,
            total_pages,
            total_count,
            limit,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }
}

/// One page of notes plus paging metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteList {
    pub notes: Vec<Note>,
    pub pagination: Pagination,
}

/// One page of search matches plus the echoed query and total match count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub notes: Vec<Note>,
    pub pagination: Pagination,
    pub query: String,
    pub result_count: i64,
}

// =============================================================================
// SUMMARY TYPES
// =============================================================================

/// The single current AI-generated condensation of a note's content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub id: Uuid,
    pub note_id: Uuid,
    pub model: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Result of generating and storing a summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryOutcome {
    pub summary: Summary,
    pub usage: TokenUsage,
    pub model: String,
}

// =============================================================================
// AI GATEWAY TYPES
// =============================================================================

/// Estimated token cost of one gateway call. Estimated, not authoritative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub response_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn of(prompt_tokens: u32, response_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            response_tokens,
            total_tokens: prompt_tokens + response_tokens,
        }
    }
}

/// Uniform gateway result shape: the payload plus usage and provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiResponse<T> {
    pub data: T,
    pub usage: TokenUsage,
    pub model: String,
    pub timestamp: DateTime<Utc>,
}
