//! # Repository Traits
//!
//! Port definitions for persistence abstraction.
//!
//! [`QuoteRepository`] abstracts quote storage so the catalog service can run
//! against SQLite in production and an in-memory map in tests.
//!
//! # Examples
//!
//! ```ignore
//! use quote_board::infrastructure::persistence::traits::QuoteRepository;
//!
//! async fn show_count(repo: &impl QuoteRepository) {
//!     let count = repo.count().await.unwrap();
//!     println!("{count} quotes stored");
//! }
//! ```

use crate::domain::entities::quote::{NewQuote, Quote};
use crate::domain::value_objects::QuoteId;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query error.
    #[error("Query error: {0}")]
    Query(String),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(String),

    /// A stored row could not be turned back into an entity.
    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}

impl RepositoryError {
    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a migration error.
    #[must_use]
    pub fn migration(msg: impl Into<String>) -> Self {
        Self::Migration(msg.into())
    }

    /// Creates a corrupt row error.
    #[must_use]
    pub fn corrupt_row(msg: impl Into<String>) -> Self {
        Self::CorruptRow(msg.into())
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository for locally stored quotes.
#[async_trait]
pub trait QuoteRepository: Send + Sync + fmt::Debug {
    /// Stores a new quote and returns it with its assigned identity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the write fails.
    async fn insert(&self, quote: NewQuote) -> RepositoryResult<Quote>;

    /// Gets a quote by identifier.
    ///
    /// Returns `None` if no quote has that identifier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the read fails.
    async fn get(&self, id: QuoteId) -> RepositoryResult<Option<Quote>>;

    /// Lists all quotes, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the read fails.
    async fn list(&self) -> RepositoryResult<Vec<Quote>>;

    /// Picks one quote uniformly at random.
    ///
    /// Returns `None` if the store is empty.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the read fails.
    async fn random(&self) -> RepositoryResult<Option<Quote>>;

    /// Finds quotes whose text or author contains `needle`, ignoring case.
    /// Results are newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the read fails.
    async fn search(&self, needle: &str) -> RepositoryResult<Vec<Quote>>;

    /// Counts stored quotes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the read fails.
    async fn count(&self) -> RepositoryResult<u64>;
}
