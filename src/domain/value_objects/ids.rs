//! # Identifiers
//!
//! Identifier types for locally stored entities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a locally persisted quote.
///
/// Assigned by the store on insert. Quotes fetched from the external search
/// never carry one.
///
/// # Examples
///
/// ```
/// use quote_board::domain::value_objects::QuoteId;
///
/// let id = QuoteId::new(42);
/// assert_eq!(id.get(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteId(i64);

impl QuoteId {
    /// Wraps a raw identifier.
    #[inline]
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
