//! # Search Transport Trait
//!
//! Port definition for fetching raw search results under a given
//! certificate policy.
//!
//! The aggregator drives escalation; a [`SearchTransport`] performs exactly
//! one HTTP request per call and reports the outcome as a tagged
//! [`AttemptOutcome`] rather than an error, so the escalation logic can be
//! tested with scripted transports.

use crate::infrastructure::search::error::{SearchError, SearchResult};
use crate::infrastructure::search::root_bundle::TrustedRoots;
use async_trait::async_trait;
use std::fmt;

/// Certificate policy used for one attempt, in escalation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportPolicy {
    /// Verification against the operating system trust store.
    PlatformVerified,
    /// Verification against the given roots only.
    TrustedBundle(TrustedRoots),
    /// Hostname and certificate verification both disabled.
    VerificationDisabled,
}

impl TransportPolicy {
    /// Returns true if this policy skips certificate verification.
    #[must_use]
    pub fn is_insecure(&self) -> bool {
        matches!(self, Self::VerificationDisabled)
    }
}

impl fmt::Display for TransportPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlatformVerified => write!(f, "platform-verified"),
            Self::TrustedBundle(roots) => write!(f, "trusted-bundle({roots})"),
            Self::VerificationDisabled => write!(f, "verification-disabled"),
        }
    }
}

/// Result of a single fetch attempt.
#[derive(Debug, Clone)]
pub enum AttemptOutcome {
    /// The request succeeded; holds the raw response body.
    Success(String),
    /// The server certificate could not be verified.
    CertificateFailure(SearchError),
    /// Any other transport failure.
    NetworkFailure(SearchError),
}

impl From<SearchResult<String>> for AttemptOutcome {
    fn from(result: SearchResult<String>) -> Self {
        match result {
            Ok(body) => Self::Success(body),
            Err(e) if e.is_certificate_failure() => Self::CertificateFailure(e),
            Err(e) => Self::NetworkFailure(e),
        }
    }
}

/// Fetches raw search results from the remote quote API.
#[async_trait]
pub trait SearchTransport: Send + Sync + fmt::Debug {
    /// Issues one search request for `query` under `policy`.
    async fn fetch(&self, query: &str, policy: &TransportPolicy) -> AttemptOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_from_result_tags_certificate_failures() {
        let outcome = AttemptOutcome::from(Err(SearchError::certificate("bad")));
        assert!(matches!(outcome, AttemptOutcome::CertificateFailure(_)));

        let outcome = AttemptOutcome::from(Err(SearchError::connection("refused")));
        assert!(matches!(outcome, AttemptOutcome::NetworkFailure(_)));

        let outcome = AttemptOutcome::from(Ok("{}".to_string()));
        assert!(matches!(outcome, AttemptOutcome::Success(body) if body == "{}"));
    }

    #[test]
    fn only_disabled_policy_is_insecure() {
        assert!(TransportPolicy::VerificationDisabled.is_insecure());
        assert!(!TransportPolicy::PlatformVerified.is_insecure());
        assert!(!TransportPolicy::TrustedBundle(TrustedRoots::WellKnown).is_insecure());
    }
}
