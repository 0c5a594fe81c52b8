//! # Domain Entities
//!
//! - [`Quote`]: a quotation, local or fetched from the external search
//! - [`NewQuote`]: validated input for storing a quote

pub mod quote;

pub use quote::{NewQuote, Quote, UNKNOWN_AUTHOR};
