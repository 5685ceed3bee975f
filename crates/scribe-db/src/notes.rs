//! PostgreSQL note store.
//!
//! Implements [`NoteStore`] over the `notes` table. Every query is scoped
//! by `owner_id`, so a note belonging to someone else is indistinguishable
//! from a missing one. Caller-supplied ids are parsed up front; a malformed
//! id fails with [`Error::InvalidId`] before any SQL runs.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::{debug, instrument};
use uuid::Uuid;

use scribe_core::uuid_utils::{new_v7, parse_id};
use scribe_core::{
    defaults, Error, ListOptions, Note, NoteDraft, NoteList, NoteStore, Pagination, Result,
    SearchResults, SortBy, SortOrder,
};

use crate::escape_like;

/// Columns selected for every note row, in [`map_note_row`] order.
const NOTE_COLUMNS: &str = "id, owner_id, title, content, is_archived, created_at, updated_at";

/// PostgreSQL-backed note store.
#[derive(Clone)]
pub struct PgNoteStore {
    pool: PgPool,
}

impl PgNoteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch one owned note row, or `NotFound`.
    async fn fetch_owned(&self, owner_id: &str, note_id: Uuid) -> Result<Note> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM notes WHERE id = $1 AND owner_id = $2",
            NOTE_COLUMNS
        ))
        .bind(note_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .ok_or_else(|| Error::NotFound(format!("Note {} not found", note_id)))?;

        Ok(map_note_row(&row))
    }
}

// ===== Row Mapping =====

fn map_note_row(row: &PgRow) -> Note {
    Note {
        id: row.get("id"),
        owner_id: row.get("owner_id"),
        title: row.get("title"),
        content: row.get("content"),
        is_archived: row.get("is_archived"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

// ===== Query Helpers =====

/// Build the `ORDER BY` fragment from validated sort options.
///
/// Both enums are closed sets, so the interpolated fragment cannot carry
/// injected SQL.
fn build_order_clause(sort_by: SortBy, sort_order: SortOrder) -> String {
    let column = match sort_by {
        SortBy::CreatedAt => "created_at",
        SortBy::UpdatedAt => "updated_at",
        SortBy::Title => "title",
    };
    let direction = match sort_order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    format!("{} {}", column, direction)
}

#[async_trait]
impl NoteStore for PgNoteStore {
    #[instrument(skip(self, draft), fields(subsystem = "db", component = "notes", op = "create", owner_id = %owner_id))]
    async fn create(&self, owner_id: &str, draft: NoteDraft) -> Result<Note> {
        draft.validate()?;

        let id = new_v7();
        let now = Utc::now();

        let row = sqlx::query(&format!(
            "INSERT INTO notes (id, owner_id, title, content, is_archived, created_at, updated_at)
             VALUES ($1, $2, $3, $4, FALSE, $5, $5)
             RETURNING {}",
            NOTE_COLUMNS
        ))
        .bind(id)
        .bind(owner_id)
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(note_id = %id, "Note created");
        Ok(map_note_row(&row))
    }

    #[instrument(skip(self), fields(subsystem = "db", component = "notes", op = "get", owner_id = %owner_id, note_id = %id))]
    async fn get_by_id(&self, owner_id: &str, id: &str) -> Result<Note> {
        let note_id = parse_id(id)?;
        self.fetch_owned(owner_id, note_id).await
    }

    #[instrument(skip(self, draft), fields(subsystem = "db", component = "notes", op = "update", owner_id = %owner_id, note_id = %id))]
    async fn update(&self, owner_id: &str, id: &str, draft: NoteDraft) -> Result<Note> {
        let note_id = parse_id(id)?;
        draft.validate()?;

        let row = sqlx::query(&format!(
            "UPDATE notes SET title = $3, content = $4, updated_at = $5
             WHERE id = $1 AND owner_id = $2
             RETURNING {}",
            NOTE_COLUMNS
        ))
        .bind(note_id)
        .bind(owner_id)
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .ok_or_else(|| Error::NotFound(format!("Note {} not found", note_id)))?;

        debug!("Note updated");
        Ok(map_note_row(&row))
    }

    #[instrument(skip(self, draft), fields(subsystem = "db", component = "notes", op = "auto_save", owner_id = %owner_id, note_id = %id))]
    async fn auto_save(&self, owner_id: &str, id: &str, draft: NoteDraft) -> Result<()> {
        let note_id = parse_id(id)?;
        draft.validate()?;

        let result = sqlx::query(
            "UPDATE notes SET title = $3, content = $4, updated_at = $5
             WHERE id = $1 AND owner_id = $2",
        )
        .bind(note_id)
        .bind(owner_id)
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Note {} not found", note_id)));
        }

        debug!("Note auto-saved");
        Ok(())
    }

    #[instrument(skip(self), fields(subsystem = "db", component = "notes", op = "archive", owner_id = %owner_id, note_id = %id))]
    async fn archive(&self, owner_id: &str, id: &str) -> Result<Note> {
        let note_id = parse_id(id)?;

        // Check state first so a double archive is reported as such.
        let current = self.fetch_owned(owner_id, note_id).await?;
        if current.is_archived {
            return Err(Error::AlreadyArchived(note_id));
        }

        let row = sqlx::query(&format!(
            "UPDATE notes SET is_archived = TRUE, updated_at = $3
             WHERE id = $1 AND owner_id = $2
             RETURNING {}",
            NOTE_COLUMNS
        ))
        .bind(note_id)
        .bind(owner_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .ok_or_else(|| Error::NotFound(format!("Note {} not found", note_id)))?;

        debug!("Note archived");
        Ok(map_note_row(&row))
    }

    #[instrument(skip(self), fields(subsystem = "db", component = "notes", op = "restore", owner_id = %owner_id, note_id = %id))]
    async fn restore(&self, owner_id: &str, id: &str) -> Result<Note> {
        let note_id = parse_id(id)?;

        let current = self.fetch_owned(owner_id, note_id).await?;
        if !current.is_archived {
            return Err(Error::NotArchived(note_id));
        }

        let row = sqlx::query(&format!(
            "UPDATE notes SET is_archived = FALSE, updated_at = $3
             WHERE id = $1 AND owner_id = $2
             RETURNING {}",
            NOTE_COLUMNS
        ))
        .bind(note_id)
        .bind(owner_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .ok_or_else(|| Error::NotFound(format!("Note {} not found", note_id)))?;

        debug!("Note restored");
        Ok(map_note_row(&row))
    }

    #[instrument(skip(self), fields(subsystem = "db", component = "notes", op = "delete", owner_id = %owner_id, note_id = %id))]
    async fn delete_permanently(&self, owner_id: &str, id: &str) -> Result<()> {
        let note_id = parse_id(id)?;

        // Summary rows go with the note via the FK cascade.
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND owner_id = $2")
            .bind(note_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Note {} not found", note_id)));
        }

        debug!("Note deleted");
        Ok(())
    }

    #[instrument(skip(self, opts), fields(subsystem = "db", component = "notes", op = "list", owner_id = %owner_id))]
    async fn list(&self, owner_id: &str, opts: ListOptions) -> Result<NoteList> {
        opts.validate()?;

        let total_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notes WHERE owner_id = $1 AND is_archived = $2",
        )
        .bind(owner_id)
        .bind(opts.archived)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        let offset = (opts.page - 1) * opts.limit;
        let query = format!(
            "SELECT {} FROM notes WHERE owner_id = $1 AND is_archived = $2
             ORDER BY {} LIMIT $3 OFFSET $4",
            NOTE_COLUMNS,
            build_order_clause(opts.sort_by, opts.sort_order)
        );

        let rows = sqlx::query(&query)
            .bind(owner_id)
            .bind(opts.archived)
            .bind(opts.limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        let notes: Vec<Note> = rows.iter().map(map_note_row).collect();

        debug!(
            result_count = notes.len(),
            total_count, "Notes page fetched"
        );

        Ok(NoteList {
            notes,
            pagination: Pagination::compute(opts.page, opts.limit, total_count),
        })
    }

    #[instrument(skip(self, query, opts), fields(subsystem = "db", component = "notes", op = "search", owner_id = %owner_id))]
    async fn search(
        &self,
        owner_id: &str,
        query: &str,
        opts: ListOptions,
    ) -> Result<SearchResults> {
        opts.validate()?;

        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(Error::Validation("Search query is required".to_string()));
        }
        if trimmed.chars().count() > defaults::MAX_SEARCH_QUERY_LEN {
            return Err(Error::Validation(format!(
                "Search query must be at most {} characters",
                defaults::MAX_SEARCH_QUERY_LEN
            )));
        }

        // Literal match: escape LIKE wildcards in the user's query.
        let pattern = format!("%{}%", escape_like(trimmed));

        let total_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notes
             WHERE owner_id = $1 AND is_archived = FALSE
               AND (title ILIKE $2 OR content ILIKE $2)",
        )
        .bind(owner_id)
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        let offset = (opts.page - 1) * opts.limit;
        let sql = format!(
            "SELECT {} FROM notes
             WHERE owner_id = $1 AND is_archived = FALSE
               AND (title ILIKE $2 OR content ILIKE $2)
             ORDER BY {} LIMIT $3 OFFSET $4",
            NOTE_COLUMNS,
            build_order_clause(opts.sort_by, opts.sort_order)
        );

        let rows = sqlx::query(&sql)
            .bind(owner_id)
            .bind(&pattern)
            .bind(opts.limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        let notes: Vec<Note> = rows.iter().map(map_note_row).collect();

        debug!(
            query = %trimmed,
            result_count = total_count,
            "Search completed"
        );

        Ok(SearchResults {
            notes,
            pagination: Pagination::compute(opts.page, opts.limit, total_count),
            query: trimmed.to_string(),
            result_count: total_count,
        })
    }
}
