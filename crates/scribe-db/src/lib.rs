//! # scribe-db
//!
//! PostgreSQL storage layer for scribe: owner-scoped note CRUD with
//! archival and substring search, plus per-note AI summaries generated
//! through an [`AiGateway`] implementation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use scribe_db::{Database, ListOptions, NoteStore};
//! use scribe_core::AiGateway;
//!
//! async fn example(gateway: Arc<dyn AiGateway>) -> scribe_db::Result<()> {
//!     let db = Database::connect("postgres://localhost/scribe", gateway).await?;
//!     let page = db.notes.list("owner-1", ListOptions::default()).await?;
//!     println!("{} notes total", page.pagination.total_count);
//!     Ok(())
//! }
//! ```

pub mod notes;
pub mod pool;
pub mod summaries;

// Available to both unit and integration tests.
pub mod test_fixtures;

use std::sync::Arc;

use sqlx::PgPool;

// Re-export core types so consumers only need this crate.
pub use scribe_core::*;

pub use notes::PgNoteStore;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};
pub use summaries::PgSummaryStore;

/// Escape LIKE/ILIKE wildcards in user input so it matches literally.
///
/// # Example
///
/// ```
/// use scribe_db::escape_like;
///
/// assert_eq!(escape_like("50%_done"), "50\\%\\_done");
/// ```
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Aggregated handle to every store, sharing one connection pool.
#[derive(Clone)]
pub struct Database {
    pub pool: PgPool,
    pub notes: PgNoteStore,
    pub summaries: PgSummaryStore,
}

impl Database {
    /// Build the store set over an existing pool.
    pub fn new(pool: PgPool, gateway: Arc<dyn AiGateway>) -> Self {
        Self {
            notes: PgNoteStore::new(pool.clone()),
            summaries: PgSummaryStore::new(pool.clone(), gateway),
            pool,
        }
    }

    /// Connect with default pool settings.
    pub async fn connect(database_url: &str, gateway: Arc<dyn AiGateway>) -> Result<Self> {
        let pool = pool::create_pool(database_url).await?;
        Ok(Self::new(pool, gateway))
    }

    /// Connect with explicit pool settings.
    pub async fn connect_with_config(
        database_url: &str,
        config: PoolConfig,
        gateway: Arc<dyn AiGateway>,
    ) -> Result<Self> {
        let pool = pool::create_pool_with_config(database_url, config).await?;
        Ok(Self::new(pool, gateway))
    }

    /// Run pending migrations from the workspace `migrations/` directory.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
