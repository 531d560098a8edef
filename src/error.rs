//! Error types for azfacts operations.

use thiserror::Error;

/// Result type alias using [`AzFactsError`].
pub type Result<T> = std::result::Result<T, AzFactsError>;

/// Errors that can occur while looking up secrets or collecting facts.
///
/// Key conversion in [`keys`](crate::keys) never fails; everything that talks
/// to a backend or provider returns this type.
#[derive(Debug, Error)]
pub enum AzFactsError {
    /// Secret or resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// No usable credentials or client for the backend.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Secret name violates Key Vault naming rules.
    #[error("invalid secret name: {0}")]
    InvalidSecretName(String),

    /// A module parameter is malformed.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A required configuration value is missing.
    #[error("missing configuration: {0}")]
    MissingConfig(String),

    /// The cloud API rejected a request.
    #[error("cloud error{}: {message}", status_suffix(.status))]
    Cloud {
        /// HTTP status, when the SDK reports one
        status: Option<u16>,
        /// Message returned by the service
        message: String,
    },

    /// Backend operation failed with context.
    #[error("{backend}: {operation} {item}: {source}")]
    BackendOperation {
        /// Backend or provider name
        backend: String,
        /// Operation name (get, list, lookup, etc.)
        operation: String,
        /// Secret or resource name
        item: String,
        /// Underlying error
        #[source]
        source: Box<AzFactsError>,
    },

    /// Other error (catch-all).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

impl AzFactsError {
    /// Creates a cloud error.
    pub fn cloud(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Cloud {
            status,
            message: message.into(),
        }
    }

    /// Creates a backend operation error with context.
    ///
    /// # Example
    ///
    /// ```
    /// use azfacts::AzFactsError;
    ///
    /// let err = AzFactsError::NotFound("db-password".to_string());
    /// let wrapped = AzFactsError::backend_op("azurekeyvault", "lookup", "db-password", err);
    ///
    /// assert_eq!(
    ///     wrapped.to_string(),
    ///     "azurekeyvault: lookup db-password: not found: db-password"
    /// );
    /// ```
    pub fn backend_op(
        backend: impl Into<String>,
        operation: impl Into<String>,
        item: impl Into<String>,
        err: AzFactsError,
    ) -> Self {
        Self::BackendOperation {
            backend: backend.into(),
            operation: operation.into(),
            item: item.into(),
            source: Box::new(err),
        }
    }

    /// Returns true for `NotFound` and for cloud errors with status 404,
    /// looking through any operation context.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Cloud { status, .. } => *status == Some(404),
            Self::BackendOperation { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}
