//! # Search HTTP Client
//!
//! reqwest-based [`SearchTransport`] for the remote quote search endpoint.
//!
//! Each attempt issues `GET <endpoint>?query=<q>&fields=content,author` with
//! the configured timeout. The platform-verified client trusts the operating
//! system store and is built once; the bundle and insecure clients are built
//! per attempt because they are only needed after a certificate failure.
//! The bundle client trusts nothing but the supplied roots.
//!
//! # Examples
//!
//! ```ignore
//! use quote_board::infrastructure::search::http_client::ReqwestSearchTransport;
//! use quote_board::infrastructure::search::traits::{SearchTransport, TransportPolicy};
//!
//! let transport = ReqwestSearchTransport::new("https://api.quotable.io/search/quotes", 10)?;
//! let outcome = transport.fetch("wisdom", &TransportPolicy::PlatformVerified).await;
//! ```

use crate::infrastructure::search::error::{SearchError, SearchResult};
use crate::infrastructure::search::root_bundle::TrustedRoots;
use crate::infrastructure::search::traits::{AttemptOutcome, SearchTransport, TransportPolicy};
use async_trait::async_trait;
use reqwest::{Certificate, Client, ClientBuilder};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Fields requested from the remote API.
pub const SEARCH_FIELDS: &str = "content,author";

/// HTTP transport for the remote quote search API.
#[derive(Debug, Clone)]
pub struct ReqwestSearchTransport {
    endpoint: String,
    timeout_secs: u64,
    verified: Client,
}

impl ReqwestSearchTransport {
    /// Creates a transport for `endpoint` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Client` if the default client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> SearchResult<Self> {
        let verified = builder(timeout_secs)
            .build()
            .map_err(|e| SearchError::client(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.into(),
            timeout_secs,
            verified,
        })
    }

    /// Returns the configured endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the configured timeout in seconds.
    #[inline]
    #[must_use]
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    fn client_for(&self, policy: &TransportPolicy) -> SearchResult<Client> {
        match policy {
            TransportPolicy::PlatformVerified => Ok(self.verified.clone()),
            TransportPolicy::TrustedBundle(roots) => {
                let mut builder = builder(self.timeout_secs).tls_built_in_root_certs(false);
                for certificate in root_certificates(roots)? {
                    builder = builder.add_root_certificate(certificate);
                }
                builder.build().map_err(|e| SearchError::client(e.to_string()))
            }
            TransportPolicy::VerificationDisabled => builder(self.timeout_secs)
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true)
                .build()
                .map_err(|e| SearchError::client(e.to_string())),
        }
    }

    async fn get(&self, client: &Client, query: &str) -> SearchResult<String> {
        let response = client
            .get(&self.endpoint)
            .query(&[("query", query), ("fields", SEARCH_FIELDS)])
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest(&e, self.timeout_secs))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::from_reqwest(&e, self.timeout_secs))?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(SearchError::http_status(status.as_u16(), &body))
        }
    }
}

#[async_trait]
impl SearchTransport for ReqwestSearchTransport {
    async fn fetch(&self, query: &str, policy: &TransportPolicy) -> AttemptOutcome {
        debug!(%policy, endpoint = %self.endpoint, "searching remote quotes");

        let result = match self.client_for(policy) {
            Ok(client) => self.get(&client, query).await,
            Err(e) => Err(e),
        };
        AttemptOutcome::from(result)
    }
}

fn builder(timeout_secs: u64) -> ClientBuilder {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("quote-board/", env!("CARGO_PKG_VERSION")))
}

/// Decodes the certificates for `roots`.
///
/// # Errors
///
/// Returns `SearchError::RootBundle` if the roots cannot be read or hold no
/// certificate.
pub fn root_certificates(roots: &TrustedRoots) -> SearchResult<Vec<Certificate>> {
    match roots {
        TrustedRoots::WellKnown => webpki_root_certs::TLS_SERVER_ROOT_CERTS
            .iter()
            .map(|der| {
                Certificate::from_der(der)
                    .map_err(|e| SearchError::root_bundle(format!("well-known roots: {e}")))
            })
            .collect(),
        TrustedRoots::PemFile(path) => load_bundle(path),
    }
}

fn load_bundle(path: &Path) -> SearchResult<Vec<Certificate>> {
    let pem = std::fs::read(path)
        .map_err(|e| SearchError::root_bundle(format!("{}: {e}", path.display())))?;
    let certificates = Certificate::from_pem_bundle(&pem)
        .map_err(|e| SearchError::root_bundle(format!("{}: {e}", path.display())))?;
    if certificates.is_empty() {
        return Err(SearchError::root_bundle(format!(
            "{}: no certificates found",
            path.display()
        )));
    }
    Ok(certificates)
}
