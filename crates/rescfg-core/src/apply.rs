//! Patch execution against the remote config endpoint

use tracing::debug;

use crate::error::{PatchError, PatchResult};
use crate::ports::{ConfigPatcher, ProgressNotifier, RemoteErrorKind};
use crate::request::PatchRequest;
use crate::resource::Resource;

/// Spinner message shown while the patch is in flight
pub const PROGRESS_MESSAGE: &str = "Updating resource config";

/// Send `request` for `resource` in a single call and classify the outcome.
///
/// The caller guarantees the request is non-empty and every key is valid.
/// No retries are attempted.
pub async fn apply_patch(
    patcher: &dyn ConfigPatcher,
    progress: &dyn ProgressNotifier,
    resource: &Resource,
    request: &PatchRequest,
) -> PatchResult<()> {
    debug!(
        resource = %resource.id,
        keys = request.len(),
        "sending config patch"
    );

    progress.start(PROGRESS_MESSAGE);
    let result = patcher.patch_config(&resource.id, request).await;
    progress.stop();

    match result {
        Ok(()) => Ok(()),
        Err(e) => match e.kind {
            RemoteErrorKind::BadRequest => {
                debug!(resource = %resource.id, error = %e, "config patch rejected");
                Err(PatchError::RejectedKey)
            }
            RemoteErrorKind::Other => Err(PatchError::Transport(e.message)),
        },
    }
}
