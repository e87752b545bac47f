//! Home directory layout, profile settings and team preferences
//!
//! Everything lives under one home directory (`~/.rescfg` by default):
//! - `config.toml`: one table per profile (`api_url`, `team`)
//! - `credentials.<profile>.json`: the session token

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use rescfg_api::DEFAULT_API_URL;
use rescfg_core::{TeamId, TeamScope};

/// Settings stored for one profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSettings {
    pub api_url: Option<String>,
    /// Stored team preference, used when no team flag is given
    pub team: Option<String>,
}

pub type SettingsFile = BTreeMap<String, ProfileSettings>;

/// The rescfg home directory
#[derive(Debug, Clone)]
pub struct Home {
    root: PathBuf,
}

impl Home {
    /// Use `dir` if given, otherwise `~/.rescfg`
    pub fn resolve(dir: Option<PathBuf>) -> Result<Self> {
        let root = match dir {
            Some(dir) => dir,
            None => dirs::home_dir()
                .context("Cannot determine home directory")?
                .join(".rescfg"),
        };
        Ok(Self { root })
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn credentials_path(&self, profile: &str) -> PathBuf {
        self.root.join(format!("credentials.{profile}.json"))
    }

    pub fn load_settings(&self) -> Result<SettingsFile> {
        let path = self.settings_path();
        if !path.exists() {
            return Ok(SettingsFile::new());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    pub fn load_profile(&self, profile: &str) -> Result<ProfileSettings> {
        Ok(self.load_settings()?.remove(profile).unwrap_or_default())
    }
}

/// Resolve the API base URL: flag/env, then profile, then the built-in default
pub fn resolve_api_url(flag: Option<&str>, profile: &ProfileSettings) -> String {
    flag.or(profile.api_url.as_deref())
        .unwrap_or(DEFAULT_API_URL)
        .to_string()
}

/// Resolve the team scope: `--me`, then `--team`, then the stored preference
pub fn resolve_team_scope(team: Option<&str>, me: bool, profile: &ProfileSettings) -> TeamScope {
    if me {
        return TeamScope::Personal;
    }
    match team.or(profile.team.as_deref()) {
        Some(id) if !id.is_empty() => TeamScope::Team(TeamId::new(id)),
        _ => TeamScope::Personal,
    }
}
