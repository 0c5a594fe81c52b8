//! # Application Layer
//!
//! Use cases orchestrating the domain and the infrastructure adapters.

pub mod error;
pub mod services;
