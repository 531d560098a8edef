//! Azure Key Vault backend.
//!
//! This backend integrates with Azure Key Vault using the official Microsoft
//! Azure SDK for Rust.
//!
//! # Authentication
//!
//! When `tenant_id`, `client_id` and `secret` are all resolved (from config
//! options or `AZURE_TENANT`, `AZURE_CLIENT_ID`, `AZURE_SECRET`), a client
//! secret credential is used. Otherwise DefaultAzureCredential tries:
//! - Environment variables (AZURE_TENANT_ID, AZURE_CLIENT_ID, AZURE_CLIENT_SECRET)
//! - Managed Identity (when running in Azure)
//! - Azure CLI credentials
//!
//! # Configuration
//!
//! - `vault_url`: Azure Key Vault URL (required, e.g., "<https://myvault.vault.azure.net>")
//!
//! # Example
//!
//! ```
//! use azfacts::{Config, BackendType};
//!
//! let config = Config::new(BackendType::AzureKeyVault)
//!     .with_vault_url("https://myvault.vault.azure.net");
//! ```

mod backend;

pub use backend::AzureBackend;

use crate::factory;

/// Registers the Azure Key Vault backend with the factory.
pub fn register() {
    factory::register_backend("azurekeyvault", |config| {
        Ok(Box::new(AzureBackend::new(config)))
    });
    factory::register_backend("azure", |config| Ok(Box::new(AzureBackend::new(config))));
}
