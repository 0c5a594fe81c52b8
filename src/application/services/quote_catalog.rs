//! # Quote Catalog
//!
//! Use cases over locally stored quotes.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::quote::{NewQuote, Quote};
use crate::domain::value_objects::QuoteId;
use crate::infrastructure::persistence::traits::QuoteRepository;
use std::sync::Arc;
use tracing::info;

/// Application service for the local quote collection.
#[derive(Debug, Clone)]
pub struct QuoteCatalog {
    repository: Arc<dyn QuoteRepository>,
}

impl QuoteCatalog {
    /// Creates a catalog over a repository.
    #[must_use]
    pub fn new(repository: Arc<dyn QuoteRepository>) -> Self {
        Self { repository }
    }

    /// Lists all quotes, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Infrastructure` if storage fails.
    pub async fn list_quotes(&self) -> ApplicationResult<Vec<Quote>> {
        Ok(self.repository.list().await?)
    }

    /// Validates and stores a quote.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain` for blank or oversized input, or
    /// `ApplicationError::Infrastructure` if storage fails.
    pub async fn add_quote(&self, text: &str, author: &str) -> ApplicationResult<Quote> {
        let draft = NewQuote::new(text, author)?;
        let stored = self.repository.insert(draft).await?;
        info!(id = ?stored.id(), author = stored.author(), "quote added");
        Ok(stored)
    }

    /// Picks a random quote, or `None` if there are none.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Infrastructure` if storage fails.
    pub async fn random_quote(&self) -> ApplicationResult<Option<Quote>> {
        Ok(self.repository.random().await?)
    }

    /// Gets one quote by identifier.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if no quote has that identifier.
    pub async fn get_quote(&self, id: QuoteId) -> ApplicationResult<Quote> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("quote", id.to_string()))
    }

    /// Searches local quotes by text or author.
    ///
    /// A blank query returns no quotes.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Infrastructure` if storage fails.
    pub async fn search_local(&self, query: &str) -> ApplicationResult<Vec<Quote>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.repository.search(query).await?)
    }
}
