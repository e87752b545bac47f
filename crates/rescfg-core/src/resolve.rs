//! Resource resolution by label within a team scope

use tracing::debug;

use crate::error::{PatchError, PatchResult};
use crate::ports::ResourceCatalog;
use crate::resource::{Resource, TeamScope};

/// Find the first resource in `scope` whose label equals `label` exactly.
///
/// The whole collection is fetched (empty label filter) and scanned in fetch
/// order. Labels are not guaranteed unique by the backing store; when several
/// resources share one, the first fetched wins.
pub async fn find_resource(
    catalog: &dyn ResourceCatalog,
    scope: &TeamScope,
    label: &str,
) -> PatchResult<Resource> {
    let resources = catalog
        .fetch_resources(scope, "")
        .await
        .map_err(|e| PatchError::FetchResources(e.to_string()))?;
    debug!(count = resources.len(), %scope, "fetched resources");

    let mut matches = resources.into_iter().filter(|r| r.label == label);
    let resource = matches.next().ok_or(PatchError::ResourceNotFound)?;

    let extra = matches.count();
    if extra > 0 {
        debug!(
            label,
            duplicates = extra,
            chosen = %resource.id,
            "multiple resources share label, using first in fetch order"
        );
    }

    Ok(resource)
}

/// Resolve a resource that accepts configuration patches.
///
/// Fails with [`PatchError::ResourceNotFound`] when no label matches and
/// [`PatchError::NotCustom`] when the match is not custom-sourced.
pub async fn resolve_resource(
    catalog: &dyn ResourceCatalog,
    scope: &TeamScope,
    label: &str,
) -> PatchResult<Resource> {
    let resource = find_resource(catalog, scope, label).await?;
    if !resource.is_custom() {
        debug!(label, source = %resource.source, "resource is not custom");
        return Err(PatchError::NotCustom);
    }
    Ok(resource)
}
