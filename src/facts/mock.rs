//! In-memory resource provider for testing facts modules.

use super::ResourceProvider;
use crate::{AzFactsError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

const NO_GROUP: &str = "";

/// Mock provider holding wire-format resources grouped by resource group.
///
/// Resources are matched by their `Name` (or `name`) field. Insertion order
/// is kept, which makes list results deterministic.
pub struct MockResourceProvider {
    kind: String,
    resources: Arc<RwLock<Vec<(String, Value)>>>,
    last_parameters: Arc<RwLock<Option<Value>>>,

    /// Error (status, message) to return from `get()` and `list()`
    pub error: Option<(Option<u16>, String)>,
}

impl MockResourceProvider {
    /// Creates an empty provider for a resource kind.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            resources: Arc::new(RwLock::new(Vec::new())),
            last_parameters: Arc::new(RwLock::new(None)),
            error: None,
        }
    }

    /// Adds a resource, optionally inside a resource group.
    pub async fn insert(&self, resource_group: Option<&str>, resource: Value) {
        let group = resource_group.unwrap_or(NO_GROUP).to_string();
        self.resources.write().await.push((group, resource));
    }

    /// Returns the request parameters seen by the most recent call.
    pub async fn last_parameters(&self) -> Option<Value> {
        self.last_parameters.read().await.clone()
    }

    async fn record(&self, parameters: &Value) -> Result<()> {
        *self.last_parameters.write().await = Some(parameters.clone());
        match &self.error {
            Some((status, message)) => Err(AzFactsError::cloud(*status, message.clone())),
            None => Ok(()),
        }
    }
}

fn in_group(group: &str, resource_group: Option<&str>) -> bool {
    resource_group.map_or(true, |rg| rg.eq_ignore_ascii_case(group))
}

fn resource_name(resource: &Value) -> Option<&str> {
    resource
        .get("Name")
        .or_else(|| resource.get("name"))
        .and_then(Value::as_str)
}

#[async_trait]
impl ResourceProvider for MockResourceProvider {
    fn kind(&self) -> &str {
        &self.kind
    }

    async fn get(
        &self,
        resource_group: Option<&str>,
        name: &str,
        parameters: &Value,
    ) -> Result<Option<Value>> {
        self.record(parameters).await?;

        let resources = self.resources.read().await;
        Ok(resources
            .iter()
            .filter(|(group, _)| in_group(group, resource_group))
            .map(|(_, resource)| resource)
            .find(|resource| resource_name(resource) == Some(name))
            .cloned())
    }

    async fn list(&self, resource_group: Option<&str>, parameters: &Value) -> Result<Vec<Value>> {
        self.record(parameters).await?;

        let resources = self.resources.read().await;
        Ok(resources
            .iter()
            .filter(|(group, _)| in_group(group, resource_group))
            .map(|(_, resource)| resource.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_resource_group_scoping_ignores_case() {
        let provider = MockResourceProvider::new("virtualnetworks");
        provider.insert(Some("RG-One"), json!({"Name": "vnet1"})).await;
        provider.insert(Some("rg-two"), json!({"name": "vnet2"})).await;

        let scoped = provider.list(Some("rg-one"), &json!({})).await.unwrap();
        assert_eq!(scoped, vec![json!({"Name": "vnet1"})]);

        let all = provider.list(None, &json!({})).await.unwrap();
        assert_eq!(all.len(), 2);

        let found = provider.get(None, "vnet2", &json!({})).await.unwrap();
        assert_eq!(found, Some(json!({"name": "vnet2"})));
        assert!(provider
            .get(Some("rg-one"), "vnet2", &json!({}))
            .await
            .unwrap()
            .is_none());
    }
}
