//! Service traits implemented by the storage and inference crates.
//!
//! These are the seams of the system: stores are backed by PostgreSQL in
//! scribe-db, the gateway by the Gemini API in scribe-inference, and tests
//! substitute mocks behind the same traits.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    AiResponse, ListOptions, Note, NoteDraft, NoteList, SearchResults, Summary, SummaryOutcome,
};

/// Owner-scoped note persistence.
///
/// Every operation takes the calling owner's opaque id and never exposes
/// another owner's rows; a foreign note behaves exactly like a missing one.
/// String `id` parameters are validated as hyphenated UUIDs before any
/// lookup and fail with [`Error::InvalidId`](crate::Error::InvalidId)
/// otherwise.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Create a note from a validated draft. New notes are active.
    async fn create(&self, owner_id: &str, draft: NoteDraft) -> Result<Note>;

    /// Fetch one note by id.
    async fn get_by_id(&self, owner_id: &str, id: &str) -> Result<Note>;

    /// Replace title and content, bumping `updated_at`.
    async fn update(&self, owner_id: &str, id: &str, draft: NoteDraft) -> Result<Note>;

    /// Update variant for periodic editor saves; no row returned.
    async fn auto_save(&self, owner_id: &str, id: &str, draft: NoteDraft) -> Result<()>;

    /// Move an active note to the archive. Fails if already archived.
    async fn archive(&self, owner_id: &str, id: &str) -> Result<Note>;

    /// Bring an archived note back. Fails if not archived.
    async fn restore(&self, owner_id: &str, id: &str) -> Result<Note>;

    /// Delete the row for good; attached summaries cascade.
    async fn delete_permanently(&self, owner_id: &str, id: &str) -> Result<()>;

    /// One page of this owner's notes, filtered by archive state.
    async fn list(&self, owner_id: &str, opts: ListOptions) -> Result<NoteList>;

    /// Case-insensitive substring search over title and content of
    /// non-archived notes.
    async fn search(&self, owner_id: &str, query: &str, opts: ListOptions)
        -> Result<SearchResults>;
}

/// Per-note summary persistence and generation.
#[async_trait]
pub trait SummaryStore: Send + Sync {
    /// Generate a fresh summary via the AI gateway and store it as the
    /// note's single current summary.
    async fn generate_and_store(&self, owner_id: &str, note_id: &str) -> Result<SummaryOutcome>;

    /// The note's most recent summary, or `None` when none was generated.
    async fn current(&self, owner_id: &str, note_id: &str) -> Result<Option<Summary>>;
}

/// Text generation backend.
///
/// All operations enforce the prompt token budget before any network call
/// and retry transient failures internally, so callers see either a final
/// value or a final error.
#[async_trait]
pub trait AiGateway: Send + Sync {
    /// Free-form generation with the prompt sent verbatim.
    async fn generate_text(&self, prompt: &str) -> Result<AiResponse<String>>;

    /// Bullet-point summary of note content, in the note's own language.
    async fn generate_summary(&self, note_content: &str) -> Result<AiResponse<String>>;

    /// Up to six short tags describing note content.
    async fn generate_tags(&self, note_content: &str) -> Result<AiResponse<Vec<String>>>;

    /// Cheap liveness probe. Never fails; any error maps to `false`.
    async fn health_check(&self) -> bool;
}
