//! Session token loading

use std::fs;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::settings::Home;

/// Stored credentials for one profile
#[derive(Debug, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub token: String,
}

/// Token from `--token`/`RESCFG_TOKEN`, else from the profile's credentials file
pub fn load_token(home: &Home, profile: &str, flag: Option<&str>) -> Result<Option<String>> {
    if let Some(token) = flag.filter(|t| !t.is_empty()) {
        return Ok(Some(token.to_string()));
    }

    let path = home.credentials_path(profile);
    if !path.exists() {
        return Ok(None);
    }
    let content =
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let creds: StoredCredentials = serde_json::from_str(&content)
        .with_context(|| format!("Invalid credentials in {}", path.display()))?;
    Ok(Some(creds.token).filter(|t| !t.is_empty()))
}
