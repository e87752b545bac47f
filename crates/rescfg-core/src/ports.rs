//! Port traits for the collaborators the pipeline drives.
//!
//! The core never talks HTTP directly. The catalog and patch endpoint are
//! supplied by an adapter crate (`rescfg-api`), the progress notifier by the
//! CLI. Tests substitute in-memory fakes.

use async_trait::async_trait;
use thiserror::Error;

use crate::request::PatchRequest;
use crate::resource::{Resource, ResourceId, TeamScope};

/// Classification of a failed remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    /// The remote service rejected the request itself
    BadRequest,
    /// Connectivity, serialization or any unexpected status
    Other,
}

/// Error returned by remote ports
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RemoteError {
    pub kind: RemoteErrorKind,
    pub message: String,
}

impl RemoteError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            kind: RemoteErrorKind::BadRequest,
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self {
            kind: RemoteErrorKind::Other,
            message: message.into(),
        }
    }
}

/// Source of the resource collection for a scope
#[async_trait]
pub trait ResourceCatalog: Send + Sync {
    /// Fetch resources visible in `scope`.
    ///
    /// An empty `label_filter` returns the unfiltered collection; the
    /// pipeline always passes an empty filter and matches labels itself.
    async fn fetch_resources(
        &self,
        scope: &TeamScope,
        label_filter: &str,
    ) -> Result<Vec<Resource>, RemoteError>;
}

/// Remote endpoint applying a patch to a resource's configuration
#[async_trait]
pub trait ConfigPatcher: Send + Sync {
    /// Apply the whole request in one call
    async fn patch_config(
        &self,
        resource_id: &ResourceId,
        request: &PatchRequest,
    ) -> Result<(), RemoteError>;
}

/// Start/stop signals around network calls. Purely cosmetic.
pub trait ProgressNotifier: Send + Sync {
    fn start(&self, message: &str);
    fn stop(&self);
}

/// Notifier that does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn start(&self, _message: &str) {}
    fn stop(&self) {}
}
