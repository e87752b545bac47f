//! CLI command handlers

pub mod config;

use rescfg_api::MarketplaceClient;

use crate::error::CliError;
use crate::session;
use crate::settings::{self, Home, ProfileSettings};

/// Global options shared by every command
pub struct CommandContext {
    pub home: Home,
    pub profile: String,
    pub api_url: Option<String>,
    pub token: Option<String>,
}

impl CommandContext {
    /// Load the session and profile settings, then build an API client.
    ///
    /// Fails before any network call when no session token is available.
    pub fn connect(&self) -> Result<(MarketplaceClient, ProfileSettings), CliError> {
        let token = session::load_token(&self.home, &self.profile, self.token.as_deref())?
            .ok_or_else(|| CliError::NotLoggedIn {
                path: self.home.credentials_path(&self.profile).display().to_string(),
            })?;
        let prefs = self.home.load_profile(&self.profile)?;
        let api_url = settings::resolve_api_url(self.api_url.as_deref(), &prefs);
        tracing::debug!(profile = %self.profile, %api_url, "session loaded");

        let client = MarketplaceClient::new(&api_url, token)?;
        Ok((client, prefs))
    }
}
