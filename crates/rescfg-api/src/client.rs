use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use rescfg_core::{
    ConfigPatcher, PatchRequest, RemoteError, Resource, ResourceCatalog, ResourceId, TeamScope,
};

use crate::error::{ApiError, ApiResult};
use crate::models::ResourceEnvelope;

/// Base URL used when neither flag, env nor profile supplies one
pub const DEFAULT_API_URL: &str = "https://api.rescfg.dev/v1";

/// Per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Authenticated client for the marketplace REST API
pub struct MarketplaceClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl MarketplaceClient {
    pub fn new(base_url: &str, token: impl Into<String>) -> ApiResult<Self> {
        Self::with_timeout(base_url, token, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: &str,
        token: impl Into<String>,
        timeout: Duration,
    ) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("rescfg/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join `segments` onto the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
    }

    /// `GET /resources` for a scope, optionally filtered by label server-side
    pub async fn list_resources(
        &self,
        scope: &TeamScope,
        label_filter: &str,
    ) -> ApiResult<Vec<Resource>> {
        let mut query: Vec<(&str, &str)> = match scope {
            TeamScope::Personal => vec![("me", "true")],
            TeamScope::Team(id) => vec![("team_id", id.as_str())],
        };
        if !label_filter.is_empty() {
            query.push(("label", label_filter));
        }

        let resp = self
            .request(reqwest::Method::GET, self.endpoint(&["resources"])?)
            .query(&query)
            .send()
            .await?;
        let body = handle_response(resp).await?;
        let envelopes: Vec<ResourceEnvelope> = serde_json::from_str(&body)?;
        debug!(count = envelopes.len(), "listed resources");
        Ok(envelopes.into_iter().map(Resource::from).collect())
    }

    /// `PATCH /resources/{id}/config` with the whole set/unset map
    pub async fn patch_resource_config(
        &self,
        resource_id: &ResourceId,
        request: &PatchRequest,
    ) -> ApiResult<()> {
        let url = self.endpoint(&["resources", resource_id.as_str(), "config"])?;
        let resp = self
            .request(reqwest::Method::PATCH, url)
            .json(request)
            .send()
            .await?;
        handle_response(resp).await?;
        Ok(())
    }

    /// `GET /resources/{id}/config`
    pub async fn resource_config(
        &self,
        resource_id: &ResourceId,
    ) -> ApiResult<BTreeMap<String, String>> {
        let url = self.endpoint(&["resources", resource_id.as_str(), "config"])?;
        let resp = self.request(reqwest::Method::GET, url).send().await?;
        let body = handle_response(resp).await?;
        if body.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ResourceCatalog for MarketplaceClient {
    async fn fetch_resources(
        &self,
        scope: &TeamScope,
        label_filter: &str,
    ) -> Result<Vec<Resource>, RemoteError> {
        Ok(self.list_resources(scope, label_filter).await?)
    }
}

#[async_trait]
impl ConfigPatcher for MarketplaceClient {
    async fn patch_config(
        &self,
        resource_id: &ResourceId,
        request: &PatchRequest,
    ) -> Result<(), RemoteError> {
        Ok(self.patch_resource_config(resource_id, request).await?)
    }
}

/// Return the body of a successful response, or classify the failure
async fn handle_response(resp: reqwest::Response) -> ApiResult<String> {
    let status = resp.status();
    let body = resp.text().await?;

    if status.is_success() {
        return Ok(body);
    }

    let message = error_message(&body).unwrap_or_else(|| {
        if body.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        } else {
            body.clone()
        }
    });

    if status == StatusCode::BAD_REQUEST {
        Err(ApiError::BadRequest {
            status: status.as_u16(),
            message,
        })
    } else {
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

/// Pull `message` out of a JSON error body; it may be a string or a list
fn error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    match json.get("message")? {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let msgs: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        _ => None,
    }
}
