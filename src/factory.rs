//! Backend factory and registration system.

use crate::{AzFactsError, Config, Result, SecretBackend};
use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

/// Factory function type for creating backends.
pub type BackendFactory = fn(Config) -> Result<Box<dyn SecretBackend>>;

static BACKEND_REGISTRY: OnceLock<RwLock<HashMap<String, BackendFactory>>> = OnceLock::new();

fn registry() -> &'static RwLock<HashMap<String, BackendFactory>> {
    BACKEND_REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Registers a backend factory function under a name.
///
/// Backend modules call this from their `register()` function; a later
/// registration under the same name replaces the earlier one.
pub fn register_backend(backend_type: &str, factory: BackendFactory) {
    let mut reg = registry().write().unwrap_or_else(PoisonError::into_inner);
    reg.insert(backend_type.to_string(), factory);
}

/// Returns the names of all registered backends, sorted.
pub fn registered_backends() -> Vec<String> {
    let reg = registry().read().unwrap_or_else(PoisonError::into_inner);
    let mut names: Vec<String> = reg.keys().cloned().collect();
    names.sort();
    names
}

/// Creates a new backend from configuration.
///
/// The factory is looked up by `config.backend`.
///
/// # Errors
///
/// Returns an error if the backend type is not registered (missing feature
/// flag or [`crate::init`] not called), or if the factory itself fails.
///
/// # Example
///
/// ```
/// use azfacts::{factory, BackendType, Config};
///
/// azfacts::init();
/// let backend = factory::new_backend(Config::new(BackendType::Mock)).unwrap();
/// assert_eq!(backend.name(), "mock");
/// ```
pub fn new_backend(config: Config) -> Result<Box<dyn SecretBackend>> {
    let backend_name = config.backend.to_string();

    let factory = {
        let reg = registry().read().unwrap_or_else(PoisonError::into_inner);
        reg.get(&backend_name).copied()
    }
    .ok_or_else(|| {
        AzFactsError::Other(anyhow::anyhow!(
            "unknown backend: {} (is its feature flag enabled and azfacts::init() called?)",
            backend_name
        ))
    })?;

    tracing::debug!(backend = %backend_name, "creating secret backend");
    factory(config)
}
