//! # Application Services
//!
//! - [`QuoteCatalog`]: use cases over locally stored quotes
//! - [`QuoteSearchAggregator`]: external search with certificate fallback

pub mod quote_catalog;
pub mod quote_search;

pub use quote_catalog::QuoteCatalog;
pub use quote_search::{QuoteSearchAggregator, SearchOutcome, Severity};
