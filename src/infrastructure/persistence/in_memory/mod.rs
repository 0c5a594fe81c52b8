//! # In-Memory Repositories
//!
//! In-memory implementations for testing without database dependencies.
//! Storage sits behind `Arc<tokio::sync::RwLock<_>>`.

pub mod quote_repository;

pub use quote_repository::InMemoryQuoteRepository;
