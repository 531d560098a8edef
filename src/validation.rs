//! Input validation for secret names, vault URLs and tag filters.

use crate::{AzFactsError, Result};
use url::Url;

/// Maximum Key Vault object name length.
const MAX_NAME_LENGTH: usize = 127;

/// Validates a Key Vault secret name.
///
/// Key Vault names are 1-127 characters of ASCII letters, digits and `-`.
///
/// # Errors
///
/// Returns [`AzFactsError::InvalidSecretName`] if validation fails.
///
/// # Example
///
/// ```
/// use azfacts::validation::validate_secret_name;
///
/// assert!(validate_secret_name("db-password").is_ok());
/// assert!(validate_secret_name("Api2Key").is_ok());
///
/// assert!(validate_secret_name("").is_err());
/// assert!(validate_secret_name("db_password").is_err());
/// assert!(validate_secret_name("path/to/secret").is_err());
/// ```
pub fn validate_secret_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(AzFactsError::InvalidSecretName(
            "name cannot be empty".to_string(),
        ));
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(AzFactsError::InvalidSecretName(format!(
            "name exceeds maximum length of {} characters",
            MAX_NAME_LENGTH
        )));
    }

    if let Some(c) = name.chars().find(|c| !c.is_ascii_alphanumeric() && *c != '-') {
        return Err(AzFactsError::InvalidSecretName(format!(
            "{:?} contains {:?} (only letters, digits and '-' are allowed)",
            name, c
        )));
    }

    Ok(())
}

/// Validates a Key Vault URL.
///
/// The URL must parse, use `https` and name a host.
///
/// # Errors
///
/// Returns [`AzFactsError::InvalidParameter`] if validation fails.
pub fn validate_vault_url(vault_url: &str) -> Result<Url> {
    let url = Url::parse(vault_url).map_err(|e| {
        AzFactsError::InvalidParameter(format!("vault_url {:?}: {}", vault_url, e))
    })?;

    if url.scheme() != "https" {
        return Err(AzFactsError::InvalidParameter(format!(
            "vault_url {:?} must use https",
            vault_url
        )));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(AzFactsError::InvalidParameter(format!(
            "vault_url {:?} has no host",
            vault_url
        ))),
    }
}

/// A parsed tag filter.
///
/// `"env"` requires the tag to be present; `"env:prod"` also requires its
/// value to equal `prod`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    /// Tag key
    pub key: String,
    /// Required value, if any
    pub value: Option<String>,
}

/// Parses a tag filter of the form `key` or `key:value`.
///
/// Only the first `:` separates key from value, so values may contain `:`.
/// An empty value (`key:`) only checks that the tag exists, like a bare `key`.
///
/// ```
/// use azfacts::validation::parse_tag_filter;
///
/// let filter = parse_tag_filter("endpoint:https://x").unwrap();
/// assert_eq!(filter.key, "endpoint");
/// assert_eq!(filter.value.as_deref(), Some("https://x"));
/// ```
pub fn parse_tag_filter(filter: &str) -> Result<TagFilter> {
    let (key, value) = match filter.split_once(':') {
        Some((key, "")) => (key, None),
        Some((key, value)) => (key, Some(value.to_string())),
        None => (filter, None),
    };

    if key.is_empty() {
        return Err(AzFactsError::InvalidParameter(format!(
            "tag filter {:?} has an empty key",
            filter
        )));
    }

    Ok(TagFilter {
        key: key.to_string(),
        value,
    })
}
