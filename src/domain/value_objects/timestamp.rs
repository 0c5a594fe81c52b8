//! # Timestamp Value Object
//!
//! DateTime wrapper with domain-specific methods.
//!
//! Quotes record when they were stored; this module provides the
//! [`Timestamp`] type used for that purpose and for its persisted form
//! (Unix milliseconds).
//!
//! # Examples
//!
//! ```
//! use quote_board::domain::value_objects::timestamp::Timestamp;
//!
//! let earlier = Timestamp::from_millis(1_704_067_200_000).unwrap();
//! let now = Timestamp::now();
//!
//! assert!(now > earlier);
//! ```

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC timestamp.
///
/// Wraps `chrono::DateTime<Utc>`. Persisted as Unix milliseconds, so values
/// read back from storage have millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Display format used on rendered pages.
    pub const DISPLAY_FORMAT: &'static str = "%Y-%m-%d %H:%M";

    /// Creates a timestamp for the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from Unix milliseconds.
    ///
    /// Returns `None` if the value is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use quote_board::domain::value_objects::timestamp::Timestamp;
    ///
    /// let ts = Timestamp::from_millis(1704067200000).unwrap();
    /// assert_eq!(ts.timestamp_millis(), 1704067200000);
    /// ```
    #[must_use]
    pub fn from_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    /// Returns the Unix timestamp in milliseconds.
    #[inline]
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Formats the timestamp for display on a page.
    ///
    /// # Examples
    ///
    /// ```
    /// use quote_board::domain::value_objects::timestamp::Timestamp;
    ///
    /// let ts = Timestamp::from_millis(1704067200000).unwrap();
    /// assert_eq!(ts.to_display(), "2024-01-01 00:00");
    /// ```
    #[must_use]
    pub fn to_display(&self) -> String {
        self.0.format(Self::DISPLAY_FORMAT).to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
