//! Facts collection for Azure resources.
//!
//! A facts module asks a [`ResourceProvider`] for one named resource or for
//! every resource in a scope, keeps the ones whose tags match the query, and
//! reshapes each wire response (CamelCase keys) into a snake_case mapping.
//! Tag maps are user data and keep their keys as-is.
//!
//! # Example
//!
//! ```
//! use azfacts::facts::{collect_facts, mock::MockResourceProvider, FactsQuery};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> azfacts::Result<()> {
//!     let provider = MockResourceProvider::new("resourcegroups");
//!     provider
//!         .insert(None, json!({"Name": "rg1", "Tags": {"Env": "prod"}}))
//!         .await;
//!
//!     let facts = collect_facts(&provider, &FactsQuery::new().with_tag("Env:prod")).await?;
//!     assert_eq!(facts.resources, vec![json!({"name": "rg1", "tags": {"Env": "prod"}})]);
//!     Ok(())
//! }
//! ```

pub mod mock;

use crate::keys::{camel_dict_to_snake_dict, snake_dict_to_camel_dict};
use crate::validation::{parse_tag_filter, TagFilter};
use crate::{AzFactsError, Result};
use async_trait::async_trait;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Keys whose values are copied verbatim when reshaping a resource.
pub const TAG_KEYS: &[&str] = &["Tags", "tags"];

/// Source of resource descriptions for one resource kind.
///
/// Resources are returned as they come off the wire, with CamelCase or
/// dromedaryCase keys. `parameters` carries extra request options, already
/// converted to dromedaryCase.
#[async_trait]
pub trait ResourceProvider: Send + Sync {
    /// Resource kind, used to name the facts key (e.g. "resourcegroups").
    fn kind(&self) -> &str;

    /// Fetches a single resource. `Ok(None)` means it does not exist.
    async fn get(
        &self,
        resource_group: Option<&str>,
        name: &str,
        parameters: &Value,
    ) -> Result<Option<Value>>;

    /// Lists resources, scoped to a resource group when one is given.
    async fn list(&self, resource_group: Option<&str>, parameters: &Value) -> Result<Vec<Value>>;
}

/// Parameters of a facts module run.
#[derive(Debug, Clone, Default)]
pub struct FactsQuery {
    /// Only this resource
    pub name: Option<String>,
    /// Scope to this resource group
    pub resource_group: Option<String>,
    /// Tag filters, `key` or `key:value`
    pub tags: Vec<String>,
    /// Extra snake_case request parameters
    pub parameters: Map<String, Value>,
}

impl FactsQuery {
    /// Creates an empty query (all resources, no filters).
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the query to a single resource.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Scopes the query to a resource group.
    pub fn with_resource_group(mut self, resource_group: impl Into<String>) -> Self {
        self.resource_group = Some(resource_group.into());
        self
    }

    /// Adds a tag filter.
    pub fn with_tag(mut self, filter: impl Into<String>) -> Self {
        self.tags.push(filter.into());
        self
    }

    /// Adds a snake_case request parameter.
    pub fn with_parameter(mut self, key: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }
}

/// Result of a facts run.
///
/// Serializes as `{"changed": false, "ansible_facts": {"azure_<kind>": [...]}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Facts {
    /// Always false; facts modules never modify anything
    pub changed: bool,
    /// Key the resources are published under
    pub fact_key: String,
    /// Reshaped resources, in provider order
    pub resources: Vec<Value>,
}

impl Serialize for Facts {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut facts = Map::new();
        facts.insert(self.fact_key.clone(), Value::from(self.resources.clone()));

        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("changed", &self.changed)?;
        map.serialize_entry("ansible_facts", &facts)?;
        map.end()
    }
}

/// Runs a facts query against a provider.
///
/// A named resource that does not exist (provider returns `None`, or a
/// not-found error) yields an empty result rather than an error.
///
/// # Errors
///
/// - [`AzFactsError::InvalidParameter`] for a malformed tag filter
/// - [`AzFactsError::BackendOperation`] wrapping any other provider error
pub async fn collect_facts(provider: &dyn ResourceProvider, query: &FactsQuery) -> Result<Facts> {
    let filters = query
        .tags
        .iter()
        .map(|f| parse_tag_filter(f))
        .collect::<Result<Vec<_>>>()?;

    let parameters = snake_dict_to_camel_dict(&Value::Object(query.parameters.clone()), false);
    let resource_group = query.resource_group.as_deref();
    let kind = provider.kind().to_string();

    let raw = match query.name.as_deref() {
        Some(name) => {
            tracing::debug!(
                kind = %kind,
                name,
                resource_group = resource_group.unwrap_or("*"),
                "getting resource"
            );
            match provider.get(resource_group, name, &parameters).await {
                Ok(found) => found.into_iter().collect(),
                Err(e) if e.is_not_found() => Vec::new(),
                Err(e) => return Err(AzFactsError::backend_op(&kind, "get", name, e)),
            }
        }
        None => {
            tracing::debug!(
                kind = %kind,
                resource_group = resource_group.unwrap_or("*"),
                "listing resources"
            );
            provider
                .list(resource_group, &parameters)
                .await
                .map_err(|e| {
                    AzFactsError::backend_op(&kind, "list", resource_group.unwrap_or("*"), e)
                })?
        }
    };

    let total = raw.len();
    let resources: Vec<Value> = raw
        .iter()
        .filter(|resource| has_tags(resource_tags(resource), &filters))
        .map(|resource| camel_dict_to_snake_dict(resource, false, TAG_KEYS))
        .collect();

    tracing::info!(kind = %kind, total, matched = resources.len(), "collected facts");

    Ok(Facts {
        changed: false,
        fact_key: format!("azure_{}", kind),
        resources,
    })
}

fn resource_tags(resource: &Value) -> Option<&Map<String, Value>> {
    TAG_KEYS
        .iter()
        .find_map(|key| resource.get(key))
        .and_then(Value::as_object)
}

/// Checks a tag map against every filter.
///
/// With no filters every resource matches, including untagged ones. A bare
/// key requires the tag to exist; `key:value` also requires the value to
/// match. Non-string tag values are compared by their JSON text.
pub fn has_tags(tags: Option<&Map<String, Value>>, filters: &[TagFilter]) -> bool {
    if filters.is_empty() {
        return true;
    }
    let Some(tags) = tags else {
        return false;
    };

    filters.iter().all(|filter| match (tags.get(&filter.key), &filter.value) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(Value::String(actual)), Some(expected)) => actual == expected,
        (Some(actual), Some(expected)) => actual.to_string() == *expected,
    })
}
