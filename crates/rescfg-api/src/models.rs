//! Wire types for the marketplace API

use rescfg_core::{Resource, ResourceId};
use serde::{Deserialize, Serialize};

/// A resource as returned by `GET /resources`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceEnvelope {
    pub id: String,
    pub body: ResourceBody,
}

/// Resource attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceBody {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Missing source is treated as non-custom
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl From<ResourceEnvelope> for Resource {
    fn from(env: ResourceEnvelope) -> Self {
        Self {
            id: ResourceId::new(env.id),
            label: env.body.label,
            name: env.body.name,
            source: env.body.source.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_resource_list() {
        let json = r#"[
            {"id": "r1", "body": {"label": "app", "name": "App", "source": "custom", "team_id": "t1"}},
            {"id": "r2", "body": {"label": "db"}}
        ]"#;
        let envelopes: Vec<ResourceEnvelope> = serde_json::from_str(json).unwrap();
        let resources: Vec<Resource> = envelopes.into_iter().map(Resource::from).collect();

        assert_eq!(resources[0].id.as_str(), "r1");
        assert_eq!(resources[0].name.as_deref(), Some("App"));
        assert!(resources[0].is_custom());
        assert_eq!(resources[1].source, "");
        assert!(!resources[1].is_custom());
    }
}
