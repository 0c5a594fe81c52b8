//! # SQLite Quote Repository
//!
//! SQLite implementation of [`QuoteRepository`] using sqlx.
//!
//! Timestamps are stored as Unix milliseconds. The schema is created by
//! [`SqliteQuoteRepository::migrate`], which the server calls during
//! startup before accepting requests.

use crate::domain::entities::quote::{NewQuote, Quote};
use crate::domain::value_objects::{QuoteId, Timestamp};
use crate::infrastructure::persistence::traits::{
    QuoteRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS quotes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        text TEXT NOT NULL,
        author TEXT NOT NULL,
        created_at INTEGER NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS ix_quotes_text ON quotes (text)",
    "CREATE INDEX IF NOT EXISTS ix_quotes_author ON quotes (author)",
];

/// SQLite implementation of [`QuoteRepository`].
///
/// # Examples
///
/// ```ignore
/// use quote_board::infrastructure::persistence::sqlite::SqliteQuoteRepository;
///
/// let repo = SqliteQuoteRepository::connect("sqlite://./sql_app.db", 5).await?;
/// repo.migrate().await?;
/// ```
#[derive(Debug, Clone)]
pub struct SqliteQuoteRepository {
    pool: SqlitePool,
}

impl SqliteQuoteRepository {
    /// Creates a repository over an existing pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool for `url`, creating the database file if missing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Connection` if the URL is invalid or the
    /// database cannot be opened.
    pub async fn connect(url: &str, max_connections: u32) -> RepositoryResult<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| RepositoryError::connection(format!("invalid database url: {e}")))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| RepositoryError::connection(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Opens a private in-memory database.
    ///
    /// The pool holds a single connection that never expires, since every
    /// new in-memory connection would see an empty database.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Connection` if SQLite cannot be opened.
    pub async fn in_memory() -> RepositoryResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| RepositoryError::connection(e.to_string()))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| RepositoryError::connection(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Creates the `quotes` table and its indexes if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Migration` if a statement fails.
    pub async fn migrate(&self) -> RepositoryResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| RepositoryError::migration(e.to_string()))?;
        }
        info!("quotes schema is up to date");
        Ok(())
    }

    /// Closes the pool, waiting for connections to be released.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl QuoteRepository for SqliteQuoteRepository {
    async fn insert(&self, quote: NewQuote) -> RepositoryResult<Quote> {
        let created_at = Timestamp::now();

        let result = sqlx::query("INSERT INTO quotes (text, author, created_at) VALUES (?1, ?2, ?3)")
            .bind(quote.text())
            .bind(quote.author())
            .bind(created_at.timestamp_millis())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        // Truncate to stored precision so the result equals a later `get`.
        let id = QuoteId::new(result.last_insert_rowid());
        let stored_at = Timestamp::from_millis(created_at.timestamp_millis()).unwrap_or(created_at);
        Ok(quote.into_quote(id, stored_at))
    }

    async fn get(&self, id: QuoteId) -> RepositoryResult<Option<Quote>> {
        let row: Option<QuoteRow> =
            sqlx::query_as("SELECT id, text, author, created_at FROM quotes WHERE id = ?1")
                .bind(id.get())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::query(e.to_string()))?;

        row.map(QuoteRow::try_into_quote).transpose()
    }

    async fn list(&self) -> RepositoryResult<Vec<Quote>> {
        let rows: Vec<QuoteRow> = sqlx::query_as(
            "SELECT id, text, author, created_at FROM quotes ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        rows.into_iter().map(QuoteRow::try_into_quote).collect()
    }

    async fn random(&self) -> RepositoryResult<Option<Quote>> {
        let row: Option<QuoteRow> = sqlx::query_as(
            "SELECT id, text, author, created_at FROM quotes ORDER BY RANDOM() LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        row.map(QuoteRow::try_into_quote).transpose()
    }

    async fn search(&self, needle: &str) -> RepositoryResult<Vec<Quote>> {
        // SQLite LIKE and lower() only fold ASCII, so matching happens on
        // the decoded quotes with the same rules as `Quote::matches`.
        let rows: Vec<QuoteRow> = sqlx::query_as(
            "SELECT id, text, author, created_at FROM quotes ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        let mut found = Vec::new();
        for row in rows {
            let quote = row.try_into_quote()?;
            if quote.matches(needle) {
                found.push(quote);
            }
        }
        Ok(found)
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM quotes")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        Ok(u64::try_from(count).unwrap_or(0))
    }
}

/// Row type for quote queries.
#[derive(Debug, sqlx::FromRow)]
struct QuoteRow {
    id: i64,
    text: String,
    author: String,
    created_at: i64,
}

impl QuoteRow {
    fn try_into_quote(self) -> RepositoryResult<Quote> {
        let created_at = Timestamp::from_millis(self.created_at).ok_or_else(|| {
            RepositoryError::corrupt_row(format!("invalid created_at on quote {}", self.id))
        })?;

        Ok(Quote::from_parts(
            QuoteId::new(self.id),
            self.text,
            self.author,
            created_at,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn repo() -> SqliteQuoteRepository {
        let repo = SqliteQuoteRepository::in_memory().await.unwrap();
        repo.migrate().await.unwrap();
        repo
    }

    fn draft(text: &str, author: &str) -> NewQuote {
        NewQuote::new(text, author).unwrap()
    }

    #[tokio::test]
    async fn migrate_is_idempotent() {
        let repo = repo().await;
        repo.migrate().await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn insert_then_get() {
        let repo = repo().await;
        let stored = repo.insert(draft("Carpe diem", "Horace")).await.unwrap();
        let id = stored.id().unwrap();

        let fetched = repo.get(id).await.unwrap().unwrap();
        assert_eq!(fetched, stored);
        assert!(repo.get(QuoteId::new(id.get() + 1)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let repo = repo().await;
        repo.insert(draft("first", "a")).await.unwrap();
        repo.insert(draft("second", "b")).await.unwrap();

        let all = repo.list().await.unwrap();
        let texts: Vec<&str> = all.iter().map(Quote::text).collect();
        assert_eq!(texts, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn random_on_empty_store_is_none() {
        let repo = repo().await;
        assert!(repo.random().await.unwrap().is_none());
        repo.insert(draft("only", "a")).await.unwrap();
        assert_eq!(repo.random().await.unwrap().unwrap().text(), "only");
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_literal() {
        let repo = repo().await;
        repo.insert(draft("Knowledge is power", "Francis Bacon"))
            .await
            .unwrap();
        repo.insert(draft("100% effort", "Coach")).await.unwrap();

        assert_eq!(repo.search("POWER").await.unwrap().len(), 1);
        assert_eq!(repo.search("bacon").await.unwrap().len(), 1);
        assert_eq!(repo.search("100%").await.unwrap().len(), 1);
        assert!(repo.search("_").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_folds_non_ascii_case() {
        let repo = repo().await;
        repo.insert(draft("Être ou ne pas être", "Émile")).await.unwrap();

        assert_eq!(repo.search("ÊTRE").await.unwrap().len(), 1);
        assert_eq!(repo.search("émile").await.unwrap().len(), 1);
        assert!(repo.search("zoë").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn count_tracks_inserts() {
        let repo = repo().await;
        repo.insert(draft("a", "x")).await.unwrap();
        repo.insert(draft("b", "y")).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
