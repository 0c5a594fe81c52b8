//! # In-Memory Quote Repository
//!
//! In-memory implementation of [`QuoteRepository`] for testing.
//!
//! Identifiers are assigned from a monotonically increasing counter, the
//! same way an autoincrement column would.

use crate::domain::entities::quote::{NewQuote, Quote};
use crate::domain::value_objects::{QuoteId, Timestamp};
use crate::infrastructure::persistence::traits::{QuoteRepository, RepositoryResult};
use async_trait::async_trait;
use rand::Rng;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Storage {
    quotes: BTreeMap<QuoteId, Quote>,
    last_id: i64,
}

/// In-memory implementation of [`QuoteRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuoteRepository {
    storage: Arc<RwLock<Storage>>,
}

impl InMemoryQuoteRepository {
    /// Creates a new empty in-memory quote repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut quotes: Vec<Quote>) -> Vec<Quote> {
    quotes.sort_by(|a, b| b.created_at().cmp(&a.created_at()).then(b.id().cmp(&a.id())));
    quotes
}

#[async_trait]
impl QuoteRepository for InMemoryQuoteRepository {
    async fn insert(&self, quote: NewQuote) -> RepositoryResult<Quote> {
        let mut storage = self.storage.write().await;
        storage.last_id += 1;
        let id = QuoteId::new(storage.last_id);
        let stored = quote.into_quote(id, Timestamp::now());
        storage.quotes.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get(&self, id: QuoteId) -> RepositoryResult<Option<Quote>> {
        let storage = self.storage.read().await;
        Ok(storage.quotes.get(&id).cloned())
    }

    async fn list(&self) -> RepositoryResult<Vec<Quote>> {
        let storage = self.storage.read().await;
        Ok(newest_first(storage.quotes.values().cloned().collect()))
    }

    async fn random(&self) -> RepositoryResult<Option<Quote>> {
        let storage = self.storage.read().await;
        if storage.quotes.is_empty() {
            return Ok(None);
        }
        let index = rand::rng().random_range(0..storage.quotes.len());
        Ok(storage.quotes.values().nth(index).cloned())
    }

    async fn search(&self, needle: &str) -> RepositoryResult<Vec<Quote>> {
        let storage = self.storage.read().await;
        let found = storage
            .quotes
            .values()
            .filter(|q| q.matches(needle))
            .cloned()
            .collect();
        Ok(newest_first(found))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let storage = self.storage.read().await;
        Ok(storage.quotes.len() as u64)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft(text: &str, author: &str) -> NewQuote {
        NewQuote::new(text, author).unwrap()
    }

    #[tokio::test]
    async fn new_repository_is_empty() {
        let repo = InMemoryQuoteRepository::new();
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(repo.random().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let repo = InMemoryQuoteRepository::new();
        let first = repo.insert(draft("one", "a")).await.unwrap();
        let second = repo.insert(draft("two", "b")).await.unwrap();
        assert_eq!(first.id(), Some(QuoteId::new(1)));
        assert_eq!(second.id(), Some(QuoteId::new(2)));
        assert!(second.created_at().is_some());
    }

    #[tokio::test]
    async fn get_returns_stored_quote() {
        let repo = InMemoryQuoteRepository::new();
        let stored = repo.insert(draft("one", "a")).await.unwrap();
        let fetched = repo.get(QuoteId::new(1)).await.unwrap();
        assert_eq!(fetched, Some(stored));
        assert!(repo.get(QuoteId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let repo = InMemoryQuoteRepository::new();
        repo.insert(draft("one", "a")).await.unwrap();
        repo.insert(draft("two", "b")).await.unwrap();
        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].text(), "two");
    }

    #[tokio::test]
    async fn random_returns_a_stored_quote() {
        let repo = InMemoryQuoteRepository::new();
        repo.insert(draft("only", "a")).await.unwrap();
        let picked = repo.random().await.unwrap().unwrap();
        assert_eq!(picked.text(), "only");
    }

    #[tokio::test]
    async fn search_matches_text_and_author() {
        let repo = InMemoryQuoteRepository::new();
        repo.insert(draft("Knowledge is power", "Bacon")).await.unwrap();
        repo.insert(draft("I think therefore I am", "Descartes"))
            .await
            .unwrap();
        assert_eq!(repo.search("POWER").await.unwrap().len(), 1);
        assert_eq!(repo.search("descartes").await.unwrap().len(), 1);
        assert!(repo.search("kant").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_folds_non_ascii_case() {
        let repo = InMemoryQuoteRepository::new();
        repo.insert(draft("Être ou ne pas être", "Émile")).await.unwrap();

        assert_eq!(repo.search("ÊTRE").await.unwrap().len(), 1);
        assert_eq!(repo.search("émile").await.unwrap().len(), 1);
        assert!(repo.search("zoë").await.unwrap().is_empty());
    }
}
