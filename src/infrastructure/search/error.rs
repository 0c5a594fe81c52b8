//! # Search Transport Errors
//!
//! Error types for calls to the external quote search API.
//!
//! The aggregator only needs to know whether a failure was caused by
//! certificate verification (recoverable by switching transport policy) or
//! by anything else. [`SearchError::is_certificate_failure`] answers that.
//!
//! # Examples
//!
//! ```
//! use quote_board::infrastructure::search::error::SearchError;
//!
//! let error = SearchError::certificate("invalid peer certificate: UnknownIssuer");
//! assert!(error.is_certificate_failure());
//!
//! let error = SearchError::connection("connection refused");
//! assert!(!error.is_certificate_failure());
//! ```

use std::error::Error as StdError;
use thiserror::Error;

/// Markers that identify a certificate verification failure somewhere in an
/// error chain, matched case-insensitively.
const CERTIFICATE_MARKERS: &[&str] = &["certificate", "unknownissuer", "self signed", "self-signed"];

/// Maximum number of response body bytes echoed into an error message.
const MAX_BODY_SNIPPET: usize = 200;

/// Error type for external search requests.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// The server certificate could not be verified.
    #[error("certificate verification failed: {message}")]
    Certificate {
        /// Error message.
        message: String,
    },

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },

    /// DNS, connect or other transport failure.
    #[error("connection failed: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// Status code.
        status: u16,
        /// Leading part of the response body.
        body: String,
    },

    /// The trusted root bundle could not be loaded.
    #[error("trusted root bundle unusable: {message}")]
    RootBundle {
        /// Error message.
        message: String,
    },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {message}")]
    Client {
        /// Error message.
        message: String,
    },
}

impl SearchError {
    /// Creates a certificate error.
    #[must_use]
    pub fn certificate(message: impl Into<String>) -> Self {
        Self::Certificate {
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(timeout_secs: u64) -> Self {
        Self::Timeout { timeout_secs }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates an HTTP status error, keeping only the start of the body.
    #[must_use]
    pub fn http_status(status: u16, body: &str) -> Self {
        let mut snippet: String = body.chars().take(MAX_BODY_SNIPPET).collect();
        if snippet.len() < body.len() {
            snippet.push_str("...");
        }
        let body = snippet;
        Self::HttpStatus { status, body }
    }

    /// Creates a root bundle error.
    #[must_use]
    pub fn root_bundle(message: impl Into<String>) -> Self {
        Self::RootBundle {
            message: message.into(),
        }
    }

    /// Creates a client construction error.
    #[must_use]
    pub fn client(message: impl Into<String>) -> Self {
        Self::Client {
            message: message.into(),
        }
    }

    /// Classifies a reqwest error.
    ///
    /// Certificate failures are detected by walking the source chain, since
    /// reqwest reports them as generic connect errors wrapping the TLS error.
    #[must_use]
    pub fn from_reqwest(error: &reqwest::Error, timeout_secs: u64) -> Self {
        if let Some(message) = certificate_failure_in_chain(error) {
            Self::certificate(message)
        } else if error.is_timeout() {
            Self::timeout(timeout_secs)
        } else {
            Self::connection(chain_message(error))
        }
    }

    /// Returns true if this error means the certificate could not be verified.
    #[must_use]
    pub fn is_certificate_failure(&self) -> bool {
        matches!(self, Self::Certificate { .. })
    }
}

/// Returns the message of the first error in the chain that looks like a
/// certificate verification failure.
pub fn certificate_failure_in_chain(error: &(dyn StdError + 'static)) -> Option<String> {
    let mut current: Option<&(dyn StdError + 'static)> = Some(error);
    while let Some(err) = current {
        let message = err.to_string();
        let lowered = message.to_lowercase();
        if CERTIFICATE_MARKERS.iter().any(|m| lowered.contains(m)) {
            return Some(message);
        }
        current = err.source();
    }
    None
}

/// Joins the messages of an error chain with `": "`.
fn chain_message(error: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![error.to_string()];
    let mut current = error.source();
    while let Some(err) = current {
        let message = err.to_string();
        if parts.last() != Some(&message) {
            parts.push(message);
        }
        current = err.source();
    }
    parts.join(": ")
}

/// Result type for search transport operations.
pub type SearchResult<T> = Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Layer {
        message: &'static str,
        source: Option<Box<Layer>>,
    }

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.message)
        }
    }

    impl StdError for Layer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.source.as_deref().map(|s| s as &(dyn StdError + 'static))
        }
    }

    fn chain(messages: &[&'static str]) -> Layer {
        let mut layer: Option<Box<Layer>> = None;
        for message in messages.iter().rev() {
            layer = Some(Box::new(Layer {
                message,
                source: layer,
            }));
        }
        match layer {
            Some(layer) => *layer,
            None => Layer {
                message: "",
                source: None,
            },
        }
    }

    #[test]
    fn detects_nested_tls_error() {
        let err = chain(&[
            "error sending request",
            "client error (Connect)",
            "invalid peer certificate: UnknownIssuer",
        ]);
        assert_eq!(
            certificate_failure_in_chain(&err).as_deref(),
            Some("invalid peer certificate: UnknownIssuer")
        );
    }

    #[test]
    fn detects_openssl_style_message() {
        let err = chain(&["[SSL: CERTIFICATE_VERIFY_FAILED] certificate verify failed"]);
        assert!(certificate_failure_in_chain(&err).is_some());
    }

    #[test]
    fn ignores_plain_connection_errors() {
        let err = chain(&["error sending request", "tcp connect error", "Connection refused"]);
        assert!(certificate_failure_in_chain(&err).is_none());
        assert_eq!(
            chain_message(&err),
            "error sending request: tcp connect error: Connection refused"
        );
    }

    #[test]
    fn http_status_truncates_body() {
        let body = "x".repeat(500);
        let err = SearchError::http_status(502, &body);
        match err {
            SearchError::HttpStatus { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body.len(), MAX_BODY_SNIPPET + 3);
            }
            other => unreachable!("unexpected variant {other:?}"),
        }
    }

    #[test]
    fn only_certificate_variant_is_certificate_failure() {
        assert!(SearchError::certificate("x").is_certificate_failure());
        assert!(!SearchError::timeout(10).is_certificate_failure());
        assert!(!SearchError::root_bundle("x").is_certificate_failure());
    }

    #[test]
    fn display_format() {
        assert_eq!(
            SearchError::timeout(10).to_string(),
            "request timed out after 10s"
        );
    }
}
