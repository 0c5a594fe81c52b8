//! # SQLite Repositories
//!
//! sqlx-backed implementations used by the server.

pub mod quote_repository;

pub use quote_repository::SqliteQuoteRepository;
