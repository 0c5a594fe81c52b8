//! # Trusted Root Bundle
//!
//! Capability that supplies a set of trusted certificate authorities for
//! the second search tier.
//!
//! The aggregator asks a [`TrustedRootProvider`] for roots only after the
//! platform-verified attempt failed certificate verification. The default
//! provider always has an answer: a PEM file when one is configured (or
//! named by `SSL_CERT_FILE`), otherwise the well-known Mozilla root set
//! compiled into the binary. [`NoRootBundle`] makes the tier unavailable.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable conventionally pointing at a CA bundle.
pub const SSL_CERT_FILE_ENV: &str = "SSL_CERT_FILE";

/// Trusted roots used in place of the platform store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrustedRoots {
    /// The Mozilla root program set shipped with the binary.
    WellKnown,
    /// A PEM bundle on disk.
    PemFile(PathBuf),
}

impl fmt::Display for TrustedRoots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WellKnown => write!(f, "well-known"),
            Self::PemFile(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Provides trusted roots, if any are available.
pub trait TrustedRootProvider: Send + Sync + fmt::Debug {
    /// Returns the roots to trust, or `None` when the tier is unavailable.
    fn trusted_roots(&self) -> Option<TrustedRoots>;
}

/// Provider that never has roots.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRootBundle;

impl TrustedRootProvider for NoRootBundle {
    fn trusted_roots(&self) -> Option<TrustedRoots> {
        None
    }
}

/// Default provider.
///
/// Prefers the configured path, then `SSL_CERT_FILE`, each only while the
/// file exists, and falls back to [`TrustedRoots::WellKnown`].
#[derive(Debug, Clone, Default)]
pub struct DefaultRootBundle {
    configured: Option<PathBuf>,
}

impl DefaultRootBundle {
    /// Creates a provider with an optional bundle path override.
    #[must_use]
    pub fn new(configured: Option<PathBuf>) -> Self {
        Self { configured }
    }

    fn pem_file(&self) -> Option<PathBuf> {
        self.configured
            .clone()
            .filter(|p| is_file(p))
            .or_else(|| {
                env::var_os(SSL_CERT_FILE_ENV)
                    .map(PathBuf::from)
                    .filter(|p| is_file(p))
            })
    }
}

impl TrustedRootProvider for DefaultRootBundle {
    fn trusted_roots(&self) -> Option<TrustedRoots> {
        Some(
            self.pem_file()
                .map_or(TrustedRoots::WellKnown, TrustedRoots::PemFile),
        )
    }
}

fn is_file(path: &Path) -> bool {
    path.metadata().map(|m| m.is_file()).unwrap_or(false)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn no_bundle_is_absent() {
        assert!(NoRootBundle.trusted_roots().is_none());
    }

    #[test]
    fn configured_existing_file_overrides_well_known() {
        let path = env::temp_dir().join(format!("quote-board-ca-{}.pem", std::process::id()));
        std::fs::write(&path, "not really a certificate").unwrap();

        let provider = DefaultRootBundle::new(Some(path.clone()));
        assert_eq!(provider.trusted_roots(), Some(TrustedRoots::PemFile(path.clone())));

        std::fs::remove_file(&path).unwrap();
        assert_ne!(provider.trusted_roots(), Some(TrustedRoots::PemFile(path)));
    }

    #[test]
    fn configured_directory_is_not_a_bundle() {
        let dir = env::temp_dir();
        let provider = DefaultRootBundle::new(Some(dir.clone()));
        assert_ne!(provider.trusted_roots(), Some(TrustedRoots::PemFile(dir)));
        assert!(provider.trusted_roots().is_some());
    }

    #[test]
    fn display_names_the_source() {
        assert_eq!(TrustedRoots::WellKnown.to_string(), "well-known");
        assert_eq!(
            TrustedRoots::PemFile(PathBuf::from("/etc/ssl/ca.pem")).to_string(),
            "/etc/ssl/ca.pem"
        );
    }
}
