//! Mock backend for testing.
//!
//! An in-memory, versioned secret store with error injection for testing
//! code that uses azfacts without a live vault.

use crate::secret::secret_id;
use crate::*;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

const MOCK_VAULT_URL: &str = "https://mock.vault.azure.net";

/// Mock backend for testing.
///
/// Each secret keeps its full version history; the last version written is
/// the current one.
///
/// # Example
///
/// ```
/// use azfacts::backends::mock::MockBackend;
/// use azfacts::{AzFactsError, SecretBackend};
///
/// #[tokio::main]
/// async fn main() -> azfacts::Result<()> {
///     let mut backend = MockBackend::new();
///     backend.init().await?;
///     backend.set_secret("api-key", "v1").await;
///
///     backend.get_error = Some(AzFactsError::cloud(Some(403), "Forbidden"));
///     assert!(backend.get_secret("api-key", None).await.is_err());
///
///     Ok(())
/// }
/// ```
pub struct MockBackend {
    secrets: Arc<RwLock<HashMap<String, Vec<Secret>>>>,
    initialized: bool,

    /// Error to return from `init()`
    pub init_error: Option<AzFactsError>,
    /// Error to return from `get_secret()`
    pub get_error: Option<AzFactsError>,
}

impl MockBackend {
    /// Creates a new mock backend with empty storage.
    pub fn new() -> Self {
        Self {
            secrets: Arc::new(RwLock::new(HashMap::new())),
            initialized: false,
            init_error: None,
            get_error: None,
        }
    }

    /// Stores a new version of a secret and returns its version id.
    pub async fn set_secret(&self, name: impl Into<String>, value: impl Into<String>) -> String {
        let secret = Secret::new(MOCK_VAULT_URL, name, value);
        let version = secret.version.clone().unwrap_or_default();

        let mut secrets = self.secrets.write().await;
        secrets.entry(secret.name.clone()).or_default().push(secret);
        version
    }

    /// Disables the current version of a secret.
    pub async fn disable_secret(&self, name: &str) {
        let mut secrets = self.secrets.write().await;
        if let Some(current) = secrets.get_mut(name).and_then(|v| v.last_mut()) {
            current.enabled = false;
            current.updated = Some(Utc::now());
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

// Injected errors are stored by value, so hand out an equivalent copy.
fn injected(err: &AzFactsError) -> AzFactsError {
    match err {
        AzFactsError::NotFound(name) => AzFactsError::NotFound(name.clone()),
        AzFactsError::NotAuthenticated => AzFactsError::NotAuthenticated,
        AzFactsError::Cloud { status, message } => AzFactsError::cloud(*status, message.clone()),
        other => AzFactsError::Other(anyhow::anyhow!("{}", other)),
    }
}

#[async_trait]
impl SecretBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn init(&mut self) -> Result<()> {
        if let Some(ref err) = self.init_error {
            return Err(injected(err));
        }
        self.initialized = true;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.initialized = false;
        Ok(())
    }

    async fn is_authenticated(&self) -> bool {
        self.initialized
    }

    async fn get_secret(&self, name: &str, version: Option<&str>) -> Result<Secret> {
        if !self.initialized {
            return Err(AzFactsError::NotAuthenticated);
        }
        if let Some(ref err) = self.get_error {
            return Err(injected(err));
        }

        let secrets = self.secrets.read().await;
        let versions = secrets
            .get(name)
            .ok_or_else(|| AzFactsError::NotFound(name.to_string()))?;

        let secret = match version {
            Some(v) => versions.iter().find(|s| s.version.as_deref() == Some(v)),
            None => versions.last(),
        };

        secret.cloned().ok_or_else(|| {
            AzFactsError::NotFound(secret_id(MOCK_VAULT_URL, name, version))
        })
    }

    async fn list_secrets(&self) -> Result<Vec<String>> {
        if !self.initialized {
            return Err(AzFactsError::NotAuthenticated);
        }
        let secrets = self.secrets.read().await;
        let mut names: Vec<String> = secrets.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

/// Registers the mock backend with the factory.
pub fn register() {
    factory::register_backend("mock", |_cfg| Ok(Box::new(MockBackend::new())));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_backend_set_and_get() {
        let mut backend = MockBackend::new();
        backend.init().await.unwrap();
        backend.set_secret("test-key", "test-value").await;

        let secret = backend.get_secret("test-key", None).await.unwrap();
        assert_eq!(secret.value, "test-value");
        assert!(secret.id.starts_with("https://mock.vault.azure.net/secrets/test-key/"));
    }

    #[tokio::test]
    async fn test_mock_backend_versions() {
        let mut backend = MockBackend::new();
        backend.init().await.unwrap();
        let v1 = backend.set_secret("db", "first").await;
        let v2 = backend.set_secret("db", "second").await;
        assert_ne!(v1, v2);

        assert_eq!(backend.get_secret("db", None).await.unwrap().value, "second");
        assert_eq!(backend.get_secret("db", Some(&v1)).await.unwrap().value, "first");

        let missing = backend.get_secret("db", Some("nope")).await;
        assert!(matches!(missing, Err(AzFactsError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_mock_backend_requires_init() {
        let backend = MockBackend::new();
        assert!(!backend.is_authenticated().await);
        let result = backend.get_secret("anything", None).await;
        assert!(matches!(result, Err(AzFactsError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_mock_backend_exists_and_list() {
        let mut backend = MockBackend::new();
        backend.init().await.unwrap();
        backend.set_secret("b-key", "1").await;
        backend.set_secret("a-key", "2").await;

        assert!(backend.secret_exists("a-key").await.unwrap());
        assert!(!backend.secret_exists("c-key").await.unwrap());
        assert_eq!(backend.list_secrets().await.unwrap(), vec!["a-key", "b-key"]);
    }

    #[tokio::test]
    async fn test_error_injection() {
        let mut backend = MockBackend::new();
        backend.init_error = Some(AzFactsError::NotAuthenticated);
        assert!(backend.init().await.is_err());

        backend.init_error = None;
        backend.init().await.unwrap();
        backend.get_error = Some(AzFactsError::cloud(Some(500), "InternalError"));

        let result = backend.get_secret("anything", None).await;
        assert!(matches!(result, Err(AzFactsError::Cloud { status: Some(500), .. })));
        // a non-404 failure is not swallowed by secret_exists
        assert!(backend.secret_exists("anything").await.is_err());
    }

    #[tokio::test]
    async fn test_disable_secret() {
        let mut backend = MockBackend::new();
        backend.init().await.unwrap();
        backend.set_secret("k", "v").await;
        backend.disable_secret("k").await;

        assert!(!backend.get_secret("k", None).await.unwrap().enabled);
    }
}
