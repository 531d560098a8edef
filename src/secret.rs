//! Secret data structures returned by backends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A secret stored in a vault.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Secret {
    /// Full secret identifier (for Key Vault, the secret URL including version)
    pub id: String,

    /// Secret name
    pub name: String,

    /// Secret value
    pub value: String,

    /// Version identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Whether the secret is enabled
    pub enabled: bool,

    /// When this version was created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    /// When this version was last updated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

impl Secret {
    /// Creates an enabled secret with a fresh version id.
    ///
    /// ```
    /// use azfacts::Secret;
    ///
    /// let secret = Secret::new("https://kv.vault.azure.net", "db-password", "hunter2");
    /// assert_eq!(secret.value, "hunter2");
    /// assert!(secret.id.starts_with("https://kv.vault.azure.net/secrets/db-password/"));
    /// ```
    pub fn new(vault_url: &str, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let version = uuid::Uuid::new_v4().simple().to_string();
        let now = Utc::now();

        Self {
            id: secret_id(vault_url, &name, Some(&version)),
            name,
            value: value.into(),
            version: Some(version),
            enabled: true,
            created: Some(now),
            updated: Some(now),
        }
    }
}

/// Builds a Key Vault secret identifier: `{vault}/secrets/{name}[/{version}]`.
pub fn secret_id(vault_url: &str, name: &str, version: Option<&str>) -> String {
    let base = vault_url.trim_end_matches('/');
    match version {
        Some(version) => format!("{}/secrets/{}/{}", base, name, version),
        None => format!("{}/secrets/{}", base, name),
    }
}

/// Splits a Key Vault secret identifier into name and optional version.
///
/// ```
/// use azfacts::secret::parse_secret_id;
///
/// let (name, version) = parse_secret_id("https://kv.vault.azure.net/secrets/db/abc123").unwrap();
/// assert_eq!(name, "db");
/// assert_eq!(version, Some("abc123"));
/// ```
pub fn parse_secret_id(id: &str) -> Option<(&str, Option<&str>)> {
    let (_, path) = id.split_once("/secrets/")?;
    let mut parts = path.trim_end_matches('/').splitn(2, '/');
    let name = parts.next().filter(|n| !n.is_empty())?;
    let version = parts.next().filter(|v| !v.is_empty());
    Some((name, version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_secret() {
        let secret = Secret::new("https://kv.vault.azure.net/", "api-key", "value");
        assert_eq!(secret.name, "api-key");
        assert!(secret.enabled);
        assert!(secret.created.is_some());

        let version = secret.version.clone().unwrap();
        assert_eq!(
            secret.id,
            format!("https://kv.vault.azure.net/secrets/api-key/{}", version)
        );
    }

    #[test]
    fn test_parse_secret_id() {
        assert_eq!(
            parse_secret_id("https://kv.vault.azure.net/secrets/db"),
            Some(("db", None))
        );
        assert_eq!(
            parse_secret_id("https://kv.vault.azure.net/secrets/db/v1/"),
            Some(("db", Some("v1")))
        );
        assert_eq!(parse_secret_id("https://kv.vault.azure.net/keys/db"), None);
        assert_eq!(parse_secret_id("https://kv.vault.azure.net/secrets/"), None);
    }

    #[test]
    fn test_secret_serialization_skips_empty() {
        let mut secret = Secret::new("https://kv.vault.azure.net", "k", "v");
        secret.version = None;
        let json = serde_json::to_value(&secret).unwrap();
        assert!(json.get("version").is_none());
        assert!(json.get("created").is_some());

        let back: Secret = serde_json::from_value(json).unwrap();
        assert_eq!(back, secret);
    }

    #[test]
    fn test_secret_serialized_fields() {
        let secret = Secret::new("https://kv.vault.azure.net", "k", "v");
        let json = serde_json::to_value(&secret).unwrap();

        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec!["created", "enabled", "id", "name", "updated", "value", "version"]
        );
    }
}
