//! # Quote Search Aggregator
//!
//! Searches the external quote API and never fails.
//!
//! This module provides the [`QuoteSearchAggregator`], which tries a fixed
//! sequence of transport policies until one returns a response:
//!
//! 1. [`TransportPolicy::PlatformVerified`]
//! 2. [`TransportPolicy::TrustedBundle`], only after a certificate failure
//!    and only if a bundle is installed
//! 3. [`TransportPolicy::VerificationDisabled`], with a warning attached
//!
//! A non-certificate failure on the first tier ends the search. Whatever
//! happens, the caller gets a [`SearchOutcome`]: a (possibly empty) list of
//! quotes plus an optional human-readable diagnostic. Only the last
//! diagnostic set during a search is kept.
//!
//! # Examples
//!
//! ```ignore
//! use quote_board::application::services::QuoteSearchAggregator;
//!
//! let outcome = aggregator.search(Some("wisdom")).await;
//! if let Some(message) = outcome.diagnostic() {
//!     eprintln!("{message}");
//! }
//! for quote in outcome.quotes() {
//!     println!("{quote}");
//! }
//! ```

use crate::domain::entities::quote::Quote;
use crate::infrastructure::search::root_bundle::TrustedRootProvider;
use crate::infrastructure::search::traits::{AttemptOutcome, SearchTransport, TransportPolicy};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Diagnostic attached when results were fetched without verification.
pub const VERIFICATION_DISABLED_WARNING: &str = "Warning: SSL certificate verification was disabled for this search. \
     Install a trusted root certificate bundle to re-enable verification.";

/// How serious a search diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Results were fetched, but with reduced security.
    Warning,
    /// The search failed.
    Error,
}

/// Result of a search: quotes plus an optional diagnostic.
///
/// # Invariants
///
/// - `quotes` is always defined, possibly empty
/// - `diagnostic` is set only when the transport degraded or failed
/// - `severity` is set exactly when `diagnostic` is
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    quotes: Vec<Quote>,
    diagnostic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    severity: Option<Severity>,
}

impl SearchOutcome {
    /// An outcome with no results and no diagnostic.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// An outcome with no results and a diagnostic.
    #[must_use]
    pub fn failed(diagnostic: impl Into<String>) -> Self {
        Self {
            quotes: Vec::new(),
            diagnostic: Some(diagnostic.into()),
            severity: Some(Severity::Error),
        }
    }

    /// An outcome with results, optionally carrying a warning.
    #[must_use]
    pub fn with_warning(quotes: Vec<Quote>, warning: Option<String>) -> Self {
        let severity = warning.as_ref().map(|_| Severity::Warning);
        Self {
            quotes,
            diagnostic: warning,
            severity,
        }
    }

    /// Returns the normalized quotes, in response order.
    #[must_use]
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Returns the diagnostic, if any.
    #[must_use]
    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }

    /// Returns the diagnostic's severity, if there is a diagnostic.
    #[must_use]
    pub fn severity(&self) -> Option<Severity> {
        self.severity
    }
}

/// What the aggregator does after a failed attempt.
#[derive(Debug)]
enum Next {
    /// Try the next tier.
    Escalate,
    /// Stop with this diagnostic.
    GiveUp(String),
}

/// Searches the external quote API across escalating transport policies.
#[derive(Debug, Clone)]
pub struct QuoteSearchAggregator {
    transport: Arc<dyn SearchTransport>,
    roots: Arc<dyn TrustedRootProvider>,
}

impl QuoteSearchAggregator {
    /// Creates a new aggregator.
    #[must_use]
    pub fn new(transport: Arc<dyn SearchTransport>, roots: Arc<dyn TrustedRootProvider>) -> Self {
        Self { transport, roots }
    }

    /// Searches for quotes matching `query`.
    ///
    /// An absent or blank query returns an empty outcome without any
    /// network call. This method never fails; see [`SearchOutcome`].
    pub async fn search(&self, query: Option<&str>) -> SearchOutcome {
        let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) else {
            return SearchOutcome::empty();
        };

        let (body, diagnostic) = match self.fetch_escalating(query).await {
            Ok(fetched) => fetched,
            Err(diagnostic) => return SearchOutcome::failed(diagnostic),
        };

        match serde_json::from_str::<Value>(&body) {
            Ok(document) => SearchOutcome::with_warning(normalize_results(&document), diagnostic),
            Err(e) => {
                error!(query, error = %e, "search response is not valid JSON");
                SearchOutcome::failed(format!("Unexpected error: invalid JSON in search response: {e}"))
            }
        }
    }

    /// Walks the tiers. Returns the body and any warning, or the final
    /// diagnostic when every usable tier failed.
    async fn fetch_escalating(&self, query: &str) -> Result<(String, Option<String>), String> {
        let mut policy = TransportPolicy::PlatformVerified;
        loop {
            debug!(query, %policy, "search attempt");
            let next = match self.transport.fetch(query, &policy).await {
                AttemptOutcome::Success(body) => {
                    let diagnostic = policy.is_insecure().then(|| {
                        warn!(query, "search succeeded with certificate verification disabled");
                        VERIFICATION_DISABLED_WARNING.to_string()
                    });
                    return Ok((body, diagnostic));
                }
                AttemptOutcome::CertificateFailure(e) => {
                    warn!(query, %policy, error = %e, "certificate verification failed");
                    on_failure(&policy, e.to_string(), true)
                }
                AttemptOutcome::NetworkFailure(e) => {
                    warn!(query, %policy, error = %e, "search attempt failed");
                    on_failure(&policy, e.to_string(), false)
                }
            };

            match next {
                Next::Escalate => policy = self.next_policy(&policy),
                Next::GiveUp(diagnostic) => {
                    error!(query, %diagnostic, "search failed");
                    return Err(diagnostic);
                }
            }
        }
    }

    /// Policy to try after `current` failed with a certificate error.
    fn next_policy(&self, current: &TransportPolicy) -> TransportPolicy {
        match current {
            TransportPolicy::PlatformVerified => match self.roots.trusted_roots() {
                Some(roots) => TransportPolicy::TrustedBundle(roots),
                None => {
                    debug!("no trusted roots available, skipping tier");
                    TransportPolicy::VerificationDisabled
                }
            },
            TransportPolicy::TrustedBundle(_) | TransportPolicy::VerificationDisabled => {
                TransportPolicy::VerificationDisabled
            }
        }
    }
}

fn on_failure(policy: &TransportPolicy, detail: String, certificate: bool) -> Next {
    match policy {
        TransportPolicy::PlatformVerified if certificate => Next::Escalate,
        TransportPolicy::PlatformVerified => Next::GiveUp(format!("Network error: {detail}")),
        TransportPolicy::TrustedBundle(_) => Next::Escalate,
        TransportPolicy::VerificationDisabled => Next::GiveUp(format!(
            "Network error: {detail} (even with certificate verification disabled)"
        )),
    }
}

/// Normalizes a search response into quotes.
///
/// Anything other than an object with a `results` array yields no quotes.
/// Items are kept in order; `content` becomes the text unchanged and a
/// missing author becomes "Unknown". Items whose `content` is missing or
/// blank are skipped.
#[must_use]
pub fn normalize_results(document: &Value) -> Vec<Quote> {
    let Some(results) = document.get("results").and_then(Value::as_array) else {
        return Vec::new();
    };

    results
        .iter()
        .filter_map(|item| {
            let text = item.get("content")?.as_str()?;
            if text.trim().is_empty() {
                return None;
            }
            let author = item.get("author").and_then(Value::as_str);
            Some(Quote::unsaved(text, author))
        })
        .collect()
}
