//! # External Quote Search
//!
//! Adapters for the third-party quote search API.
//!
//! - [`traits`]: the [`SearchTransport`] port and [`TransportPolicy`] tiers
//! - [`http_client`]: reqwest implementation
//! - [`root_bundle`]: trusted roots for the second tier
//! - [`error`]: transport error classification

pub mod error;
pub mod http_client;
pub mod root_bundle;
pub mod traits;

pub use error::{SearchError, SearchResult};
pub use http_client::ReqwestSearchTransport;
pub use root_bundle::{DefaultRootBundle, NoRootBundle, TrustedRootProvider, TrustedRoots};
pub use traits::{AttemptOutcome, SearchTransport, TransportPolicy};
