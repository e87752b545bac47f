//! Error types for the configuration patch pipeline

use thiserror::Error;

/// Result type for patch pipeline operations
pub type PatchResult<T> = Result<T, PatchError>;

/// Errors that can occur while patching a resource's configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    /// Caller supplied no operations, or a malformed set token
    #[error("{0}")]
    Usage(String),

    /// Key does not match the config key pattern
    #[error("Bad config key `{key}`")]
    InvalidKey { key: String },

    /// The resource collection could not be fetched
    #[error("Could not retrieve resources: {0}")]
    FetchResources(String),

    /// No resource in the scope carries the requested label
    #[error("No resource found with that name")]
    ResourceNotFound,

    /// The matching resource is not custom-sourced
    #[error("Config can only be set on custom resources")]
    NotCustom,

    /// The remote endpoint rejected the request itself
    #[error("Could not change config: invalid key.")]
    RejectedKey,

    /// Any other failure from the remote layer
    #[error("{0}")]
    Transport(String),
}

impl PatchError {
    /// Usage error for an empty operand list
    #[must_use]
    pub fn no_operations() -> Self {
        Self::Usage("At least one key must be present".into())
    }

    /// Usage error for a set token lacking `=`
    #[must_use]
    pub fn malformed_assignment() -> Self {
        Self::Usage("Config must be of the form KEY=VALUE".into())
    }

    /// Whether this error belongs to the usage class
    #[must_use]
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }

    /// Get the error code for CLI output and logs
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usage(_) => "USAGE_ERROR",
            Self::InvalidKey { .. } => "VALIDATION_ERROR",
            Self::FetchResources(_) => "FETCH_FAILED",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::NotCustom => "NOT_MUTABLE",
            Self::RejectedKey => "REMOTE_REJECTED",
            Self::Transport(_) => "TRANSPORT_ERROR",
        }
    }
}
