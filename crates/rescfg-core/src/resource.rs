//! Resource and team scope types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source classification of resources that accept configuration patches
pub const CUSTOM_SOURCE: &str = "custom";

/// Opaque resource identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque team identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(String);

impl TeamId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account context that filters which resources are visible
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum TeamScope {
    /// The caller's own resources
    #[default]
    Personal,
    /// Resources owned by a team
    Team(TeamId),
}

impl TeamScope {
    #[must_use]
    pub fn team_id(&self) -> Option<&TeamId> {
        match self {
            Self::Personal => None,
            Self::Team(id) => Some(id),
        }
    }
}

impl fmt::Display for TeamScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Personal => write!(f, "personal"),
            Self::Team(id) => write!(f, "team {id}"),
        }
    }
}

/// A provisioned resource as seen by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    /// Human-readable label used for lookup
    pub label: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Provisioning source (`custom` for user-defined resources)
    pub source: String,
}

impl Resource {
    pub fn new(id: impl Into<String>, label: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: ResourceId::new(id),
            label: label.into(),
            name: None,
            source: source.into(),
        }
    }

    /// Whether this resource accepts configuration patches
    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.source == CUSTOM_SOURCE
    }
}
