//! Set/unset command pipeline
//!
//! Both entry points converge on one linear sequence:
//! build request -> validate keys -> resolve resource -> apply patch.
//! Any step's failure ends the invocation; nothing is retried and no network
//! call is made before local validation has passed.

use tracing::{debug, info_span, Instrument};

use crate::apply::apply_patch;
use crate::error::{PatchError, PatchResult};
use crate::key::validate_keys;
use crate::ports::{ConfigPatcher, NoProgress, ProgressNotifier, ResourceCatalog};
use crate::request::PatchRequest;
use crate::resolve::resolve_resource;
use crate::resource::{Resource, TeamScope};

/// Message shown once a patch has been applied
pub const CONFIRMATION: &str = "Your configuration has been updated.";

/// Result of a successful patch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub resource: Resource,
    pub set: usize,
    pub unset: usize,
}

impl PatchOutcome {
    #[must_use]
    pub fn confirmation(&self) -> &'static str {
        CONFIRMATION
    }

    /// One-line pointer to the command that shows current config
    #[must_use]
    pub fn review_hint(&self) -> String {
        format!(
            "Use `rescfg config show --resource {}` to review your config.",
            self.resource.label
        )
    }
}

/// Drives the patch pipeline over the supplied ports
pub struct ConfigPipeline<'a> {
    catalog: &'a dyn ResourceCatalog,
    patcher: &'a dyn ConfigPatcher,
    progress: &'a dyn ProgressNotifier,
}

impl<'a> ConfigPipeline<'a> {
    pub fn new(catalog: &'a dyn ResourceCatalog, patcher: &'a dyn ConfigPatcher) -> Self {
        Self {
            catalog,
            patcher,
            progress: &NoProgress,
        }
    }

    #[must_use]
    pub fn with_progress(mut self, progress: &'a dyn ProgressNotifier) -> Self {
        self.progress = progress;
        self
    }

    /// Apply `KEY=VALUE` tokens to the resource labelled `label`
    pub async fn apply_set<S: AsRef<str>>(
        &self,
        scope: &TeamScope,
        label: &str,
        tokens: &[S],
    ) -> PatchResult<PatchOutcome> {
        ensure_operations(tokens)?;
        let request = PatchRequest::from_set_tokens(tokens)?;
        self.apply(scope, label, &request).await
    }

    /// Remove `keys` from the resource labelled `label`
    pub async fn apply_unset<S: AsRef<str>>(
        &self,
        scope: &TeamScope,
        label: &str,
        keys: &[S],
    ) -> PatchResult<PatchOutcome> {
        ensure_operations(keys)?;
        let request = PatchRequest::from_unset_keys(keys.iter().map(|k| k.as_ref().to_string()));
        self.apply(scope, label, &request).await
    }

    /// Validate, resolve and apply an already-built request
    pub async fn apply(
        &self,
        scope: &TeamScope,
        label: &str,
        request: &PatchRequest,
    ) -> PatchResult<PatchOutcome> {
        if request.is_empty() {
            return Err(PatchError::no_operations());
        }
        validate_keys(request)?;

        async {
            let resource = resolve_resource(self.catalog, scope, label).await?;
            apply_patch(self.patcher, self.progress, &resource, request).await?;
            debug!(resource = %resource.id, "config patch applied");

            Ok::<_, PatchError>(PatchOutcome {
                set: request.set_count(),
                unset: request.unset_count(),
                resource,
            })
        }
        .instrument(info_span!("config_patch", label, %scope))
        .await
    }
}

fn ensure_operations<S>(operands: &[S]) -> PatchResult<()> {
    if operands.is_empty() {
        return Err(PatchError::no_operations());
    }
    Ok(())
}
