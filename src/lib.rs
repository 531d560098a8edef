//! azfacts - Azure facts and Key Vault lookups with normalized keys.
//!
//! Azure APIs speak CamelCase; configuration tooling wants snake_case. This
//! crate provides the pieces the Azure facts modules and the Key Vault
//! secret lookup are built from:
//!
//! - [`keys`]: convert mapping keys of JSON trees between CamelCase and
//!   snake_case, with a reversible mode and an ignore list for subtrees such
//!   as resource tags
//! - [`lookup`]: fetch secret values from Azure Key Vault for a list of terms
//! - [`facts`]: query a resource provider, filter by tags and reshape the
//!   responses into snake_case facts
//!
//! # Quick Start
//!
//! ```
//! use azfacts::keys::camel_dict_to_snake_dict;
//! use serde_json::json;
//!
//! let response = json!({
//!     "Name": "web-rg",
//!     "Properties": {"ProvisioningState": "Succeeded"},
//!     "Tags": {"CostCenter": "42"}
//! });
//!
//! let facts = camel_dict_to_snake_dict(&response, false, &["Tags"]);
//! assert_eq!(facts, json!({
//!     "name": "web-rg",
//!     "properties": {"provisioning_state": "Succeeded"},
//!     "tags": {"CostCenter": "42"}
//! }));
//! ```
//!
//! # Secret Backends
//!
//! | Backend | Feature Flag | Notes |
//! |---------|-------------|-------|
//! | Mock | `mock` (default) | In-memory, versioned, error injection |
//! | Azure Key Vault | `azure` | SDK-based |

pub mod backend;
pub mod backends;
pub mod config;
pub mod error;
pub mod facts;
pub mod factory;
pub mod keys;
pub mod lookup;
pub mod secret;
pub mod validation;

pub use backend::SecretBackend;
pub use config::{BackendType, Config, Credentials};
pub use error::{AzFactsError, Result};
pub use secret::Secret;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the azfacts library.
///
/// This registers all compiled backends with the factory. It is idempotent.
pub fn init() {
    INIT.call_once(backends::register_all);
}
