//! # Infrastructure Layer
//!
//! Adapters for storage and the external quote search API.

pub mod persistence;
pub mod search;
