//! Backend trait definition for secret stores.
//!
//! The [`SecretBackend`] trait is the seam between the lookup and a concrete
//! store: Azure Key Vault in production, the in-memory mock in tests.

use crate::{Result, Secret};
use async_trait::async_trait;

/// A read-mostly secret store.
///
/// Implementations must be `Send + Sync` so a single backend can serve
/// concurrent lookups.
///
/// # Example
///
/// ```
/// use azfacts::backends::mock::MockBackend;
/// use azfacts::SecretBackend;
///
/// #[tokio::main]
/// async fn main() -> azfacts::Result<()> {
///     let mut backend = MockBackend::new();
///     backend.set_secret("db-password", "hunter2").await;
///     backend.init().await?;
///
///     let secret = backend.get_secret("db-password", None).await?;
///     assert_eq!(secret.value, "hunter2");
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait SecretBackend: Send + Sync {
    /// Returns the backend name (e.g., "mock", "azurekeyvault").
    fn name(&self) -> &str;

    /// Initializes the backend.
    ///
    /// For SDK backends this validates configuration, resolves credentials
    /// and builds the client.
    ///
    /// # Errors
    ///
    /// - [`AzFactsError::MissingConfig`](crate::AzFactsError::MissingConfig):
    ///   a required setting such as the vault URL is absent
    /// - [`AzFactsError::InvalidParameter`](crate::AzFactsError::InvalidParameter):
    ///   a setting is malformed
    async fn init(&mut self) -> Result<()>;

    /// Releases the client.
    async fn close(&mut self) -> Result<()>;

    /// Checks whether [`init`](SecretBackend::init) produced a usable client.
    async fn is_authenticated(&self) -> bool;

    /// Retrieves a secret, optionally pinned to a version.
    ///
    /// # Errors
    ///
    /// - [`AzFactsError::NotFound`](crate::AzFactsError::NotFound):
    ///   the secret or version does not exist
    /// - [`AzFactsError::NotAuthenticated`](crate::AzFactsError::NotAuthenticated):
    ///   the backend has not been initialized
    /// - [`AzFactsError::Cloud`](crate::AzFactsError::Cloud):
    ///   the service rejected the request
    async fn get_secret(&self, name: &str, version: Option<&str>) -> Result<Secret>;

    /// Checks if a secret exists.
    async fn secret_exists(&self, name: &str) -> Result<bool> {
        match self.get_secret(name, None).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Lists the names of all secrets in the vault.
    async fn list_secrets(&self) -> Result<Vec<String>>;
}
