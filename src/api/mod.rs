//! # API Layer
//!
//! HTTP surface of the application.

pub mod rest;
