//! Pipeline integration tests
//!
//! Drive `ConfigPipeline` end-to-end over in-memory ports that record every
//! call, so each test can assert exactly which network steps ran.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use rescfg_core::{
    ConfigPatcher, ConfigPipeline, PatchError, PatchRequest, ProgressNotifier, RemoteError,
    Resource, ResourceCatalog, ResourceId, TeamId, TeamScope,
};

// =============================================================================
// Fakes
// =============================================================================

#[derive(Default)]
struct FakeCatalog {
    resources: Vec<Resource>,
    fail_with: Option<RemoteError>,
    fetches: AtomicUsize,
    filters: Mutex<Vec<String>>,
    scopes: Mutex<Vec<TeamScope>>,
}

impl FakeCatalog {
    fn with(resources: Vec<Resource>) -> Self {
        Self {
            resources,
            ..Self::default()
        }
    }

    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResourceCatalog for FakeCatalog {
    async fn fetch_resources(
        &self,
        scope: &TeamScope,
        label_filter: &str,
    ) -> Result<Vec<Resource>, RemoteError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.filters.lock().unwrap().push(label_filter.to_string());
        self.scopes.lock().unwrap().push(scope.clone());
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(self.resources.clone()),
        }
    }
}

/// Applies patches to an in-memory config map per resource
#[derive(Default)]
struct FakePatcher {
    fail_with: Option<RemoteError>,
    calls: AtomicUsize,
    state: Mutex<BTreeMap<String, BTreeMap<String, String>>>,
}

impl FakePatcher {
    fn failing(err: RemoteError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn config_of(&self, id: &str) -> BTreeMap<String, String> {
        self.state
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl ConfigPatcher for FakePatcher {
    async fn patch_config(
        &self,
        resource_id: &ResourceId,
        request: &PatchRequest,
    ) -> Result<(), RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        let mut state = self.state.lock().unwrap();
        let config = state.entry(resource_id.to_string()).or_default();
        for (key, value) in request.iter() {
            match value {
                Some(v) => {
                    config.insert(key.to_string(), v.to_string());
                }
                None => {
                    config.remove(key);
                }
            }
        }
        Ok(())
    }
}

#[derive(Default)]
struct RecordingProgress {
    events: Mutex<Vec<String>>,
}

impl ProgressNotifier for RecordingProgress {
    fn start(&self, message: &str) {
        self.events.lock().unwrap().push(format!("start:{message}"));
    }

    fn stop(&self) {
        self.events.lock().unwrap().push("stop".to_string());
    }
}

fn sample_resources() -> Vec<Resource> {
    vec![
        Resource::new("r-managed", "postgres", "catalog"),
        Resource::new("r-custom", "app-settings", "custom"),
        Resource::new("r-other", "cache", "custom"),
    ]
}

// =============================================================================
// Successful patches
// =============================================================================

#[tokio::test]
async fn test_set_on_custom_resource() {
    let catalog = FakeCatalog::with(sample_resources());
    let patcher = FakePatcher::default();
    let pipeline = ConfigPipeline::new(&catalog, &patcher);

    let outcome = pipeline
        .apply_set(&TeamScope::Personal, "app-settings", &["timeout=30"])
        .await
        .unwrap();

    assert_eq!(outcome.resource.id.as_str(), "r-custom");
    assert_eq!(outcome.set, 1);
    assert_eq!(outcome.unset, 0);
    assert_eq!(outcome.confirmation(), "Your configuration has been updated.");
    assert!(outcome.review_hint().contains("--resource app-settings"));

    assert_eq!(catalog.fetches(), 1);
    assert_eq!(patcher.calls(), 1);
    assert_eq!(patcher.config_of("r-custom")["timeout"], "30");
}

#[tokio::test]
async fn test_unset_removes_keys() {
    let catalog = FakeCatalog::with(sample_resources());
    let patcher = FakePatcher::default();
    let pipeline = ConfigPipeline::new(&catalog, &patcher);
    let scope = TeamScope::Personal;

    pipeline
        .apply_set(&scope, "app-settings", &["A=1", "B=2"])
        .await
        .unwrap();
    let outcome = pipeline
        .apply_unset(&scope, "app-settings", &["A"])
        .await
        .unwrap();

    assert_eq!(outcome.unset, 1);
    let config = patcher.config_of("r-custom");
    assert!(!config.contains_key("A"));
    assert_eq!(config["B"], "2");
}

#[tokio::test]
async fn test_catalog_called_with_empty_filter_and_scope() {
    let catalog = FakeCatalog::with(sample_resources());
    let patcher = FakePatcher::default();
    let pipeline = ConfigPipeline::new(&catalog, &patcher);
    let scope = TeamScope::Team(TeamId::new("team-42"));

    pipeline
        .apply_set(&scope, "cache", &["TTL=60"])
        .await
        .unwrap();

    assert_eq!(*catalog.filters.lock().unwrap(), vec![String::new()]);
    assert_eq!(*catalog.scopes.lock().unwrap(), vec![scope]);
}

#[tokio::test]
async fn test_progress_wraps_patch_call() {
    let catalog = FakeCatalog::with(sample_resources());
    let patcher = FakePatcher::default();
    let progress = RecordingProgress::default();
    let pipeline = ConfigPipeline::new(&catalog, &patcher).with_progress(&progress);

    pipeline
        .apply_set(&TeamScope::Personal, "app-settings", &["A=1"])
        .await
        .unwrap();

    assert_eq!(
        *progress.events.lock().unwrap(),
        vec!["start:Updating resource config".to_string(), "stop".to_string()]
    );
}

#[tokio::test]
async fn test_repeated_patch_is_idempotent() {
    let catalog = FakeCatalog::with(sample_resources());
    let patcher = FakePatcher::default();
    let pipeline = ConfigPipeline::new(&catalog, &patcher);
    let tokens = ["timeout=30", "mode=fast"];

    pipeline
        .apply_set(&TeamScope::Personal, "app-settings", &tokens)
        .await
        .unwrap();
    let first = patcher.config_of("r-custom");

    pipeline
        .apply_set(&TeamScope::Personal, "app-settings", &tokens)
        .await
        .unwrap();
    let second = patcher.config_of("r-custom");

    assert_eq!(first, second);
    assert_eq!(second.len(), 2);
}

#[tokio::test]
async fn test_duplicate_key_in_batch_last_wins() {
    let catalog = FakeCatalog::with(sample_resources());
    let patcher = FakePatcher::default();
    let pipeline = ConfigPipeline::new(&catalog, &patcher);

    let outcome = pipeline
        .apply_set(&TeamScope::Personal, "app-settings", &["A=1", "A=2"])
        .await
        .unwrap();

    assert_eq!(outcome.set, 1);
    assert_eq!(patcher.config_of("r-custom")["A"], "2");
}

// =============================================================================
// Local failures (no network)
// =============================================================================

#[tokio::test]
async fn test_empty_set_is_usage_error() {
    let catalog = FakeCatalog::with(sample_resources());
    let patcher = FakePatcher::default();
    let pipeline = ConfigPipeline::new(&catalog, &patcher);

    let err = pipeline
        .apply_set::<&str>(&TeamScope::Personal, "app-settings", &[])
        .await
        .unwrap_err();

    assert!(err.is_usage());
    assert_eq!(err.to_string(), "At least one key must be present");
    assert_eq!(catalog.fetches(), 0);
    assert_eq!(patcher.calls(), 0);
}

#[tokio::test]
async fn test_empty_unset_is_usage_error() {
    let catalog = FakeCatalog::with(sample_resources());
    let patcher = FakePatcher::default();
    let pipeline = ConfigPipeline::new(&catalog, &patcher);

    let err = pipeline
        .apply_unset::<String>(&TeamScope::Personal, "app-settings", &[])
        .await
        .unwrap_err();

    assert!(err.is_usage());
    assert_eq!(catalog.fetches(), 0);
}

#[tokio::test]
async fn test_malformed_token_rejected_before_network() {
    let catalog = FakeCatalog::with(sample_resources());
    let patcher = FakePatcher::default();
    let pipeline = ConfigPipeline::new(&catalog, &patcher);

    let err = pipeline
        .apply_set(&TeamScope::Personal, "app-settings", &["A=1", "A1"])
        .await
        .unwrap_err();

    assert_eq!(err, PatchError::malformed_assignment());
    assert_eq!(catalog.fetches(), 0);
    assert_eq!(patcher.calls(), 0);
}

#[tokio::test]
async fn test_invalid_key_aborts_whole_batch() {
    let catalog = FakeCatalog::with(sample_resources());
    let patcher = FakePatcher::default();
    let pipeline = ConfigPipeline::new(&catalog, &patcher);

    let err = pipeline
        .apply_set(
            &TeamScope::Personal,
            "app-settings",
            &["good=1", "bad-key=2"],
        )
        .await
        .unwrap_err();

    assert_eq!(
        err,
        PatchError::InvalidKey {
            key: "bad-key".into()
        }
    );
    assert_eq!(catalog.fetches(), 0);
    assert_eq!(patcher.calls(), 0);
    assert!(patcher.config_of("r-custom").is_empty());
}

#[tokio::test]
async fn test_invalid_unset_key_reported_literally() {
    let catalog = FakeCatalog::with(sample_resources());
    let patcher = FakePatcher::default();
    let pipeline = ConfigPipeline::new(&catalog, &patcher);

    let err = pipeline
        .apply_unset(&TeamScope::Personal, "app-settings", &["1st"])
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Bad config key `1st`");
}

// =============================================================================
// Resolution failures
// =============================================================================

#[tokio::test]
async fn test_not_custom_makes_no_patch_call() {
    let catalog = FakeCatalog::with(sample_resources());
    let patcher = FakePatcher::default();
    let pipeline = ConfigPipeline::new(&catalog, &patcher);

    let err = pipeline
        .apply_set(&TeamScope::Personal, "postgres", &["A=1"])
        .await
        .unwrap_err();

    assert_eq!(err, PatchError::NotCustom);
    assert_eq!(catalog.fetches(), 1);
    assert_eq!(patcher.calls(), 0);
}

#[tokio::test]
async fn test_no_label_match_is_not_found() {
    let catalog = FakeCatalog::with(sample_resources());
    let patcher = FakePatcher::default();
    let pipeline = ConfigPipeline::new(&catalog, &patcher);

    let err = pipeline
        .apply_set(&TeamScope::Personal, "missing", &["A=1"])
        .await
        .unwrap_err();

    assert_eq!(err, PatchError::ResourceNotFound);
    assert_eq!(err.to_string(), "No resource found with that name");
    assert_eq!(patcher.calls(), 0);
}

#[tokio::test]
async fn test_label_match_is_exact_and_case_sensitive() {
    let catalog = FakeCatalog::with(sample_resources());
    let patcher = FakePatcher::default();
    let pipeline = ConfigPipeline::new(&catalog, &patcher);

    for label in ["App-Settings", "app", "app-settings "] {
        let err = pipeline
            .apply_set(&TeamScope::Personal, label, &["A=1"])
            .await
            .unwrap_err();
        assert_eq!(err, PatchError::ResourceNotFound, "label {label:?}");
    }
    assert_eq!(patcher.calls(), 0);
}

#[tokio::test]
async fn test_duplicate_labels_resolve_to_first_fetched() {
    let catalog = FakeCatalog::with(vec![
        Resource::new("first", "shared", "custom"),
        Resource::new("second", "shared", "custom"),
    ]);
    let patcher = FakePatcher::default();
    let pipeline = ConfigPipeline::new(&catalog, &patcher);

    let outcome = pipeline
        .apply_set(&TeamScope::Personal, "shared", &["A=1"])
        .await
        .unwrap();

    assert_eq!(outcome.resource.id.as_str(), "first");
    assert!(patcher.config_of("second").is_empty());
}

#[tokio::test]
async fn test_first_duplicate_not_custom_fails_even_if_later_is() {
    let catalog = FakeCatalog::with(vec![
        Resource::new("first", "shared", "catalog"),
        Resource::new("second", "shared", "custom"),
    ]);
    let patcher = FakePatcher::default();
    let pipeline = ConfigPipeline::new(&catalog, &patcher);

    let err = pipeline
        .apply_set(&TeamScope::Personal, "shared", &["A=1"])
        .await
        .unwrap_err();

    assert_eq!(err, PatchError::NotCustom);
}

#[tokio::test]
async fn test_fetch_failure_reported_with_cause() {
    let catalog = FakeCatalog {
        fail_with: Some(RemoteError::other("HTTP 503 Service Unavailable")),
        ..FakeCatalog::default()
    };
    let patcher = FakePatcher::default();
    let pipeline = ConfigPipeline::new(&catalog, &patcher);

    let err = pipeline
        .apply_set(&TeamScope::Personal, "app-settings", &["A=1"])
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Could not retrieve resources: HTTP 503 Service Unavailable"
    );
    assert_eq!(patcher.calls(), 0);
}

// =============================================================================
// Remote classification
// =============================================================================

#[tokio::test]
async fn test_bad_request_maps_to_invalid_key_message() {
    let catalog = FakeCatalog::with(sample_resources());
    let patcher = FakePatcher::failing(RemoteError::bad_request("HTTP 400: unknown key"));
    let progress = RecordingProgress::default();
    let pipeline = ConfigPipeline::new(&catalog, &patcher).with_progress(&progress);

    let err = pipeline
        .apply_set(&TeamScope::Personal, "app-settings", &["A=1"])
        .await
        .unwrap_err();

    assert_eq!(err, PatchError::RejectedKey);
    assert_eq!(err.to_string(), "Could not change config: invalid key.");
    assert_eq!(patcher.calls(), 1);
    assert_eq!(progress.events.lock().unwrap().last().map(String::as_str), Some("stop"));
}

#[tokio::test]
async fn test_other_remote_error_keeps_cause() {
    let catalog = FakeCatalog::with(sample_resources());
    let patcher = FakePatcher::failing(RemoteError::other("connection refused"));
    let pipeline = ConfigPipeline::new(&catalog, &patcher);

    let err = pipeline
        .apply_set(&TeamScope::Personal, "app-settings", &["A=1"])
        .await
        .unwrap_err();

    assert_eq!(err, PatchError::Transport("connection refused".into()));
    assert_eq!(err.to_string(), "connection refused");
    assert_eq!(patcher.calls(), 1);
}
