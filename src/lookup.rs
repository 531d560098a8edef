//! Key Vault secret lookup.
//!
//! A lookup takes a list of terms (secret names) and returns their values in
//! the same order. All terms are validated before the first request is made,
//! and a single failing term fails the whole lookup.

use crate::validation::validate_secret_name;
use crate::{AzFactsError, Result, SecretBackend};

/// Looks up secret values through a [`SecretBackend`].
///
/// # Example
///
/// ```
/// use azfacts::backends::mock::MockBackend;
/// use azfacts::lookup::KeyVaultLookup;
/// use azfacts::SecretBackend;
///
/// #[tokio::main]
/// async fn main() -> azfacts::Result<()> {
///     let mut backend = MockBackend::new();
///     backend.init().await?;
///     backend.set_secret("db-user", "admin").await;
///     backend.set_secret("db-password", "hunter2").await;
///
///     let values = KeyVaultLookup::new(&backend)
///         .run(&["db-user", "db-password"])
///         .await?;
///     assert_eq!(values, vec!["admin", "hunter2"]);
///     Ok(())
/// }
/// ```
pub struct KeyVaultLookup<'a> {
    backend: &'a dyn SecretBackend,
    version: Option<String>,
}

impl<'a> KeyVaultLookup<'a> {
    /// Creates a lookup over an initialized backend.
    pub fn new(backend: &'a dyn SecretBackend) -> Self {
        Self {
            backend,
            version: None,
        }
    }

    /// Pins every term to a secret version.
    ///
    /// An empty string means "current version".
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        let version = version.into();
        self.version = (!version.is_empty()).then_some(version);
        self
    }

    /// Fetches the value of every term, in order.
    ///
    /// # Errors
    ///
    /// - [`AzFactsError::InvalidSecretName`] for a malformed term, before any
    ///   request is sent
    /// - [`AzFactsError::BackendOperation`] wrapping the backend error for the
    ///   first term that cannot be read; disabled secrets are reported as a
    ///   403 cloud error
    pub async fn run<S: AsRef<str>>(&self, terms: &[S]) -> Result<Vec<String>> {
        for term in terms {
            validate_secret_name(term.as_ref())?;
        }

        let mut values = Vec::with_capacity(terms.len());
        for term in terms {
            let term = term.as_ref();
            tracing::debug!(
                backend = self.backend.name(),
                secret = term,
                version = self.version.as_deref().unwrap_or("current"),
                "looking up secret"
            );

            let secret = self
                .backend
                .get_secret(term, self.version.as_deref())
                .await
                .map_err(|e| self.wrap(term, e))?;

            if !secret.enabled {
                let err = AzFactsError::cloud(Some(403), format!("secret {} is disabled", term));
                return Err(self.wrap(term, err));
            }

            values.push(secret.value);
        }

        tracing::info!(count = values.len(), "secret lookup complete");
        Ok(values)
    }

    fn wrap(&self, term: &str, err: AzFactsError) -> AzFactsError {
        tracing::warn!(secret = term, error = %err, "secret lookup failed");
        AzFactsError::backend_op(self.backend.name(), "lookup", term, err)
    }
}
