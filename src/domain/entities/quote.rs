//! # Quote Entity
//!
//! A quotation with its attribution.
//!
//! [`Quote`] is shared by the local catalog (where it carries an identifier
//! and a creation time) and by the external search (where it carries
//! neither). [`NewQuote`] is the validated input for storing a quote.
//!
//! # Examples
//!
//! ```
//! use quote_board::domain::entities::quote::{NewQuote, Quote};
//!
//! let draft = NewQuote::new("Stay hungry, stay foolish.", "").unwrap();
//! assert_eq!(draft.author(), "Unknown");
//!
//! let found = Quote::unsaved("Simplicity is prerequisite for reliability.", Some("Dijkstra"));
//! assert!(found.id().is_none());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{QuoteId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Author used when a source does not provide one.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Maximum accepted length of quote text, in characters.
pub const MAX_TEXT_CHARS: usize = 1_000;

/// Maximum accepted length of an author name, in characters.
pub const MAX_AUTHOR_CHARS: usize = 200;

/// A quote.
///
/// # Invariants
///
/// - `text` is non-empty
/// - `author` is non-empty (defaults to [`UNKNOWN_AUTHOR`])
/// - `id` and `created_at` are present only for persisted quotes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    id: Option<QuoteId>,
    text: String,
    author: String,
    created_at: Option<Timestamp>,
}

impl Quote {
    /// Reconstructs a persisted quote from storage.
    #[must_use]
    pub fn from_parts(
        id: QuoteId,
        text: impl Into<String>,
        author: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: Some(id),
            text: text.into(),
            author: normalize_author(author.into()),
            created_at: Some(created_at),
        }
    }

    /// Creates a quote that is not backed by local storage.
    ///
    /// A missing or blank `author` becomes [`UNKNOWN_AUTHOR`].
    #[must_use]
    pub fn unsaved(text: impl Into<String>, author: Option<&str>) -> Self {
        Self {
            id: None,
            text: text.into(),
            author: normalize_author(author.unwrap_or_default().to_string()),
            created_at: None,
        }
    }

    /// Returns the store-assigned identifier, if persisted.
    #[inline]
    #[must_use]
    pub fn id(&self) -> Option<QuoteId> {
        self.id
    }

    /// Returns the quote text.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the author.
    #[inline]
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns when the quote was stored, if persisted.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Option<Timestamp> {
        self.created_at
    }

    /// Returns true if `needle` occurs in the text or the author,
    /// ignoring case.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.text.to_lowercase().contains(&needle) || self.author.to_lowercase().contains(&needle)
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" - {}", self.text, self.author)
    }
}

/// Validated input for storing a new quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuote {
    text: String,
    author: String,
}

impl NewQuote {
    /// Validates and normalizes user input.
    ///
    /// Both fields are trimmed. An empty author becomes [`UNKNOWN_AUTHOR`].
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyQuoteText`] if the text is blank, or
    /// [`DomainError::TooLong`] if a field exceeds its limit.
    pub fn new(text: &str, author: &str) -> DomainResult<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::EmptyQuoteText);
        }
        if text.chars().count() > MAX_TEXT_CHARS {
            return Err(DomainError::TooLong {
                field: "text",
                max: MAX_TEXT_CHARS,
            });
        }
        let author = author.trim();
        if author.chars().count() > MAX_AUTHOR_CHARS {
            return Err(DomainError::TooLong {
                field: "author",
                max: MAX_AUTHOR_CHARS,
            });
        }

        Ok(Self {
            text: text.to_string(),
            author: normalize_author(author.to_string()),
        })
    }

    /// Returns the quote text.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the author.
    #[inline]
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Attaches the identity assigned by a store.
    #[must_use]
    pub fn into_quote(self, id: QuoteId, created_at: Timestamp) -> Quote {
        Quote {
            id: Some(id),
            text: self.text,
            author: self.author,
            created_at: Some(created_at),
        }
    }
}

fn normalize_author(author: String) -> String {
    let trimmed = author.trim();
    if trimmed.is_empty() {
        UNKNOWN_AUTHOR.to_string()
    } else if trimmed.len() == author.len() {
        author
    } else {
        trimmed.to_string()
    }
}
