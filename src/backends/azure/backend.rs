//! Azure Key Vault backend implementation.

use crate::secret::parse_secret_id;
use crate::validation::{validate_secret_name, validate_vault_url};
use crate::{AzFactsError, Config, Credentials, Result, Secret, SecretBackend};
use async_trait::async_trait;
use azure_core::auth::TokenCredential;
use azure_identity::{ClientSecretCredential, DefaultAzureCredential};
use azure_security_keyvault::SecretClient;
use futures::StreamExt;
use std::sync::Arc;

/// Azure Key Vault backend.
///
/// Integrates with Azure Key Vault using the official Microsoft SDK.
pub struct AzureBackend {
    client: Option<SecretClient>,
    vault_url: Option<String>,
    credentials: Credentials,
}

impl AzureBackend {
    /// Creates a new Azure Key Vault backend from configuration.
    pub fn new(config: Config) -> Self {
        Self {
            client: None,
            vault_url: config.resolved_vault_url(),
            credentials: config.credentials(),
        }
    }

    fn client(&self) -> Result<&SecretClient> {
        self.client.as_ref().ok_or(AzFactsError::NotAuthenticated)
    }

    fn token_credential(&self) -> Result<Arc<dyn TokenCredential>> {
        if let Some((tenant, client_id, secret)) = self.credentials.service_principal() {
            tracing::debug!(client_id = %client_id, "using service principal credentials");
            return Ok(Arc::new(ClientSecretCredential::new(
                azure_core::new_http_client(),
                azure_identity::authority_hosts::AZURE_PUBLIC_CLOUD.clone(),
                tenant.to_string(),
                client_id.to_string(),
                secret.to_string(),
            )));
        }

        tracing::debug!("using default Azure credential chain");
        let credential = DefaultAzureCredential::create(Default::default()).map_err(|e| {
            AzFactsError::Other(anyhow::anyhow!("Failed to create Azure credentials: {}", e))
        })?;
        Ok(Arc::new(credential))
    }
}

/// Maps an SDK error onto the crate's cloud error.
fn cloud_error(name: &str, err: azure_core::Error) -> AzFactsError {
    let message = err.to_string();
    if message.contains("SecretNotFound") || message.contains("404") {
        AzFactsError::NotFound(name.to_string())
    } else if message.contains("Forbidden") || message.contains("403") {
        AzFactsError::cloud(Some(403), message)
    } else if message.contains("Unauthorized") || message.contains("401") {
        AzFactsError::cloud(Some(401), message)
    } else {
        AzFactsError::cloud(None, message)
    }
}

#[async_trait]
impl SecretBackend for AzureBackend {
    fn name(&self) -> &str {
        "azurekeyvault"
    }

    async fn init(&mut self) -> Result<()> {
        let vault_url = self.vault_url.as_deref().ok_or_else(|| {
            AzFactsError::MissingConfig(
                "Azure vault_url is required. Set via config or AZURE_KEYVAULT_URL".to_string(),
            )
        })?;
        validate_vault_url(vault_url)?;

        let credential = self.token_credential()?;
        let client = SecretClient::new(vault_url, credential).map_err(|e| {
            AzFactsError::Other(anyhow::anyhow!("Failed to create Secret client: {}", e))
        })?;

        tracing::info!(vault_url = %vault_url, "connected to Azure Key Vault");
        self.client = Some(client);
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.client = None;
        Ok(())
    }

    async fn is_authenticated(&self) -> bool {
        self.client.is_some()
    }

    async fn get_secret(&self, name: &str, version: Option<&str>) -> Result<Secret> {
        validate_secret_name(name)?;
        let client = self.client()?;

        let mut request = client.get(name.to_string());
        if let Some(version) = version {
            request = request.version(version.to_string());
        }

        let secret = request
            .into_future()
            .await
            .map_err(|e| cloud_error(name, e))?;

        // Azure uses time::OffsetDateTime
        let created =
            chrono::DateTime::from_timestamp(secret.attributes.created_on.unix_timestamp(), 0);
        let updated =
            chrono::DateTime::from_timestamp(secret.attributes.updated_on.unix_timestamp(), 0);

        let version = parse_secret_id(&secret.id)
            .and_then(|(_, version)| version)
            .map(str::to_string);

        Ok(Secret {
            id: secret.id.clone(),
            name: name.to_string(),
            value: secret.value,
            version,
            enabled: secret.attributes.enabled,
            created,
            updated,
        })
    }

    async fn list_secrets(&self) -> Result<Vec<String>> {
        let client = self.client()?;
        let mut names = Vec::new();

        let mut pages = client.list_secrets().into_stream();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| cloud_error("list", e))?;
            for item in page.value {
                if let Some((name, _)) = parse_secret_id(&item.id) {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }
}
