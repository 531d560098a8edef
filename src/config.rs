//! Configuration types for backend initialization and credential resolution.

use std::collections::HashMap;

/// Environment variable holding the default Key Vault URL.
pub const ENV_KEYVAULT_URL: &str = "AZURE_KEYVAULT_URL";

const ENV_TENANT: &str = "AZURE_TENANT";
const ENV_CLIENT_ID: &str = "AZURE_CLIENT_ID";
const ENV_SECRET: &str = "AZURE_SECRET";

/// Backend type identifier.
///
/// Each variant corresponds to a secret backend implementation. Backends
/// other than the mock must be enabled via Cargo feature flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendType {
    /// In-memory backend for tests
    Mock,
    /// Azure Key Vault SDK backend
    AzureKeyVault,
}

impl std::fmt::Display for BackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mock => write!(f, "mock"),
            Self::AzureKeyVault => write!(f, "azurekeyvault"),
        }
    }
}

/// Service principal credentials.
///
/// Every field is optional. Fields left unset let the SDK credential chain
/// (managed identity, Azure CLI) take over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Azure AD tenant
    pub tenant_id: Option<String>,
    /// Application (client) id
    pub client_id: Option<String>,
    /// Client secret
    pub secret: Option<String>,
}

impl Credentials {
    /// Returns `(tenant, client_id, secret)` when a full service principal is set.
    pub fn service_principal(&self) -> Option<(&str, &str, &str)> {
        match (&self.tenant_id, &self.client_id, &self.secret) {
            (Some(tenant), Some(client_id), Some(secret)) => {
                Some((tenant.as_str(), client_id.as_str(), secret.as_str()))
            }
            _ => None,
        }
    }
}

/// Configuration for creating a backend.
///
/// ```
/// use azfacts::{Config, BackendType};
///
/// let config = Config::new(BackendType::AzureKeyVault)
///     .with_vault_url("https://myvault.vault.azure.net")
///     .with_option("tenant_id", "00000000-0000-0000-0000-000000000000");
///
/// assert_eq!(config.vault_url.as_deref(), Some("https://myvault.vault.azure.net"));
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend type
    pub backend: BackendType,

    /// Key Vault URL (falls back to `AZURE_KEYVAULT_URL`)
    pub vault_url: Option<String>,

    /// Backend-specific options
    pub options: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendType::Mock,
            vault_url: None,
            options: HashMap::new(),
        }
    }
}

impl Config {
    /// Creates a new configuration for the specified backend.
    pub fn new(backend: BackendType) -> Self {
        Self {
            backend,
            ..Default::default()
        }
    }

    /// Sets the Key Vault URL.
    pub fn with_vault_url(mut self, url: impl Into<String>) -> Self {
        self.vault_url = Some(url.into());
        self
    }

    /// Adds a backend-specific option.
    ///
    /// Recognized credential options: `tenant_id`, `client_id`, `secret`.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Gets a backend-specific option value.
    pub fn get_option(&self, key: &str) -> Option<&String> {
        self.options.get(key)
    }

    /// Returns the configured vault URL, or the one from the environment.
    pub fn resolved_vault_url(&self) -> Option<String> {
        self.vault_url
            .clone()
            .or_else(|| std::env::var(ENV_KEYVAULT_URL).ok())
            .filter(|url| !url.is_empty())
    }

    /// Resolves credentials from explicit options, then from the environment.
    pub fn credentials(&self) -> Credentials {
        self.credentials_with(|name| std::env::var(name).ok())
    }

    fn credentials_with(&self, env: impl Fn(&str) -> Option<String>) -> Credentials {
        let pick = |option: &str, var: &str| {
            self.options
                .get(option)
                .cloned()
                .or_else(|| env(var))
                .filter(|v| !v.is_empty())
        };

        Credentials {
            tenant_id: pick("tenant_id", ENV_TENANT),
            client_id: pick("client_id", ENV_CLIENT_ID),
            secret: pick("secret", ENV_SECRET),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = Config::new(BackendType::AzureKeyVault)
            .with_vault_url("https://kv.vault.azure.net")
            .with_option("client_id", "app");

        assert_eq!(config.backend, BackendType::AzureKeyVault);
        assert_eq!(config.resolved_vault_url().as_deref(), Some("https://kv.vault.azure.net"));
        assert_eq!(config.get_option("client_id"), Some(&"app".to_string()));
    }

    #[test]
    fn test_backend_type_display() {
        assert_eq!(BackendType::Mock.to_string(), "mock");
        assert_eq!(BackendType::AzureKeyVault.to_string(), "azurekeyvault");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.backend, BackendType::Mock);
        assert!(config.vault_url.is_none());
        assert!(config.options.is_empty());
    }

    #[test]
    fn test_credentials_prefer_options() {
        let config = Config::new(BackendType::AzureKeyVault)
            .with_option("tenant_id", "from-option")
            .with_option("secret", "");

        let env = |name: &str| match name {
            "AZURE_TENANT" => Some("from-env".to_string()),
            "AZURE_CLIENT_ID" => Some("client-env".to_string()),
            "AZURE_SECRET" => Some("secret-env".to_string()),
            _ => None,
        };
        let creds = config.credentials_with(env);

        assert_eq!(creds.tenant_id.as_deref(), Some("from-option"));
        assert_eq!(creds.client_id.as_deref(), Some("client-env"));
        // an explicit empty option does not fall back to the environment
        assert_eq!(creds.secret, None);
        assert_eq!(creds.service_principal(), None);
    }

    #[test]
    fn test_service_principal_complete() {
        let config = Config::new(BackendType::AzureKeyVault)
            .with_option("tenant_id", "t")
            .with_option("client_id", "c")
            .with_option("secret", "s");

        let creds = config.credentials_with(|_| None);
        assert_eq!(creds.service_principal(), Some(("t", "c", "s")));
    }
}
