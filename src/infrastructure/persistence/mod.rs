//! # Persistence Layer
//!
//! ## Repository Traits (Ports)
//!
//! - [`QuoteRepository`]: Persistence for quotes
//!
//! ## Implementations
//!
//! - `sqlite`: SQLite implementation via sqlx
//! - `in_memory`: In-memory implementation for testing

pub mod in_memory;
pub mod sqlite;
pub mod traits;

pub use traits::{QuoteRepository, RepositoryError, RepositoryResult};
