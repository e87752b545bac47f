//! rescfg Core - Resource configuration patch pipeline
//!
//! This crate validates configuration keys, assembles set/unset batches into a
//! single patch request, resolves the target resource within a team scope and
//! submits the patch through the ports defined in [`ports`].

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod apply;
pub mod error;
pub mod key;
pub mod pipeline;
pub mod ports;
pub mod request;
pub mod resolve;
pub mod resource;

pub use error::{PatchError, PatchResult};
pub use key::{is_valid_key, validate_keys};
pub use pipeline::{ConfigPipeline, PatchOutcome};
pub use ports::{ConfigPatcher, NoProgress, ProgressNotifier, RemoteError, RemoteErrorKind, ResourceCatalog};
pub use request::PatchRequest;
pub use resource::{Resource, ResourceId, TeamId, TeamScope, CUSTOM_SOURCE};
