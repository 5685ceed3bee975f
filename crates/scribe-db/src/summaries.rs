//! PostgreSQL summary store.
//!
//! A note has at most one current summary. [`PgSummaryStore::generate_and_store`]
//! asks the AI gateway for fresh bullet points, then replaces whatever
//! summaries the note had inside a single transaction, so concurrent
//! regenerations can never leave two "current" rows behind.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use scribe_core::uuid_utils::{new_v7, parse_id};
use scribe_core::{AiGateway, Error, Result, Summary, SummaryOutcome, SummaryStore};

/// Columns selected for every summary row, in [`map_summary_row`] order.
const SUMMARY_COLUMNS: &str = "id, note_id, model, content, created_at";

/// PostgreSQL-backed summary store delegating generation to an [`AiGateway`].
#[derive(Clone)]
pub struct PgSummaryStore {
    pool: PgPool,
    gateway: Arc<dyn AiGateway>,
}

impl PgSummaryStore {
    pub fn new(pool: PgPool, gateway: Arc<dyn AiGateway>) -> Self {
        Self { pool, gateway }
    }

    /// Fetch the owned note's content, or `NotFound`.
    async fn fetch_note_content(&self, owner_id: &str, note_id: Uuid) -> Result<String> {
        let row = sqlx::query("SELECT content FROM notes WHERE id = $1 AND owner_id = $2")
            .bind(note_id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .ok_or_else(|| Error::NotFound(format!("Note {} not found", note_id)))?;

        Ok(row.get("content"))
    }

    async fn note_exists(&self, owner_id: &str, note_id: Uuid) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM notes WHERE id = $1 AND owner_id = $2)")
                .bind(note_id)
                .bind(owner_id)
                .fetch_one(&self.pool)
                .await
                .map_err(Error::Database)?;

        Ok(exists)
    }
}

// ===== Row Mapping =====

fn map_summary_row(row: &PgRow) -> Summary {
    Summary {
        id: row.get("id"),
        note_id: row.get("note_id"),
        model: row.get("model"),
        content: row.get("content"),
        created_at: row.get("created_at"),
    }
}

// ===== Error Translation =====

/// Map a gateway failure to the error the summarization caller sees.
///
/// Token-budget rejections point at the note rather than the prompt; every
/// other gateway failure collapses into a retry-later signal.
fn translate_gateway_error(note_id: Uuid, err: Error) -> Error {
    match err {
        Error::TokenLimitExceeded { .. } => Error::ContentTooLarge(note_id),
        other => Error::AiServiceUnavailable(other.to_string()),
    }
}

#[async_trait]
impl SummaryStore for PgSummaryStore {
    #[instrument(skip(self), fields(subsystem = "db", component = "summaries", op = "generate", owner_id = %owner_id, note_id = %note_id))]
    async fn generate_and_store(&self, owner_id: &str, note_id: &str) -> Result<SummaryOutcome> {
        let id = parse_id(note_id)?;

        let content = self.fetch_note_content(owner_id, id).await?;
        if content.trim().is_empty() {
            return Err(Error::EmptyContent(id));
        }

        let response = self.gateway.generate_summary(&content).await.map_err(|e| {
            warn!(error = %e, "Summary generation failed");
            translate_gateway_error(id, e)
        })?;

        let summary_id = new_v7();
        let now = Utc::now();

        // Delete-then-insert in one transaction keeps the single-current
        // invariant under concurrent regeneration.
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        sqlx::query("DELETE FROM summaries WHERE note_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        sqlx::query(
            "INSERT INTO summaries (id, note_id, model, content, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(summary_id)
        .bind(id)
        .bind(&response.model)
        .bind(&response.data)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;

        debug!(
            model = %response.model,
            prompt_tokens = response.usage.prompt_tokens,
            response_tokens = response.usage.response_tokens,
            "Summary stored"
        );

        Ok(SummaryOutcome {
            summary: Summary {
                id: summary_id,
                note_id: id,
                model: response.model.clone(),
                content: response.data,
                created_at: now,
            },
            usage: response.usage,
            model: response.model,
        })
    }

    #[instrument(skip(self), fields(subsystem = "db", component = "summaries", op = "current", owner_id = %owner_id, note_id = %note_id))]
    async fn current(&self, owner_id: &str, note_id: &str) -> Result<Option<Summary>> {
        let id = parse_id(note_id)?;

        if !self.note_exists(owner_id, id).await? {
            return Err(Error::NotFound(format!("Note {} not found", id)));
        }

        // Newest row wins; id breaks created_at ties (UUIDv7 is time-ordered).
        let row = sqlx::query(&format!(
            "SELECT {} FROM summaries WHERE note_id = $1
             ORDER BY created_at DESC, id DESC LIMIT 1",
            SUMMARY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(|r| map_summary_row(&r)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_token_limit_to_content_too_large() {
        let note_id = Uuid::new_v4();
        let err = translate_gateway_error(
            note_id,
            Error::TokenLimitExceeded {
                estimated: 13000,
                limit: 8000,
            },
        );
        match err {
            Error::ContentTooLarge(id) => assert_eq!(id, note_id),
            other => panic!("Expected ContentTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_translate_retry_exhausted_to_unavailable() {
        let err = translate_gateway_error(
            Uuid::new_v4(),
            Error::RetryExhausted {
                operation: "generateSummary".to_string(),
                attempts: 3,
                message: "Inference error: overloaded".to_string(),
            },
        );
        match err {
            Error::AiServiceUnavailable(msg) => {
                assert_eq!(
                    msg,
                    "generateSummary failed after 3 attempts: Inference error: overloaded"
                );
            }
            other => panic!("Expected AiServiceUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_translate_generic_failure_to_unavailable() {
        let err = translate_gateway_error(
            Uuid::new_v4(),
            Error::Inference("model returned garbage".to_string()),
        );
        assert!(matches!(err, Error::AiServiceUnavailable(_)));
    }
}
