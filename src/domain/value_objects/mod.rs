//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! - [`QuoteId`]: store-assigned quote identifier
//! - [`Timestamp`]: UTC point in time

pub mod ids;
pub mod timestamp;

pub use ids::QuoteId;
pub use timestamp::Timestamp;
