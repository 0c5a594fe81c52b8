//! # quote-board
//!
//! A small quotes web application.
//!
//! Quotes are stored locally in SQLite and shown as HTML pages: the full
//! list, a random quote, a single quote, and a form to add one. A second
//! search goes to a third-party quote API through
//! [`QuoteSearchAggregator`](application::services::QuoteSearchAggregator),
//! which retries with a trusted root bundle and then without certificate
//! verification when the platform trust store rejects the server, and
//! reports what happened instead of failing.
//!
//! # Layout
//!
//! - [`domain`]: entities and value objects
//! - [`application`]: catalog and search services
//! - [`infrastructure`]: SQLite / in-memory storage, search HTTP transport
//! - [`api`]: axum router, handlers and HTML views
//! - [`config`], [`telemetry`], [`server`]: process wiring

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod server;
pub mod telemetry;
