use std::{path::Path, time::Duration};

use anyhow::{bail, Context};
use serde::Serialize;
use vigia_core::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

use crate::{
    args::ConfigArgs,
    profile::{default_token_path, Profile},
};

pub const DEFAULT_WEB_URL: &str = "http://localhost:8080";

#[derive(Debug, Serialize)]
pub struct AppConfig {
    pub profile_path: String,
    pub profile_exists: bool,
    pub api_url: String,
    pub web_url: String,
    pub token_path: String,
    pub token_configured: bool,
    pub timeout_secs: u64,
    #[serde(skip)]
    pub token: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            profile_path: "./".to_string(),
            profile_exists: false,
            api_url: DEFAULT_BASE_URL.to_string(),
            web_url: DEFAULT_WEB_URL.to_string(),
            token_path: "./vigia.token".to_string(),
            token_configured: false,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            token: None,
        }
    }
}

impl AppConfig {
    /// Merge command line / environment, profile and defaults, in that order
    pub fn from_args(args: ConfigArgs, profile_path: &Path, profile: Option<&Profile>) -> Self {
        let defaults = AppConfig::default();

        let api_url = args
            .api_url
            .or_else(|| profile.and_then(|p| p.api_url.clone()))
            .unwrap_or(defaults.api_url);

        let web_url = args
            .web_url
            .or_else(|| profile.and_then(|p| p.web_url.clone()))
            .unwrap_or(defaults.web_url);

        let token_path = profile
            .and_then(|p| p.token_path.clone())
            .unwrap_or_else(|| {
                default_token_path(profile_path)
                    .to_string_lossy()
                    .into_owned()
            });

        let token = args.token.filter(|t| !t.trim().is_empty());

        AppConfig {
            profile_exists: profile.is_some(),
            profile_path: profile_path
                .to_str()
                .map(|p| p.to_string())
                .unwrap_or(defaults.profile_path),
            token_configured: token.is_some() || Path::new(&token_path).exists(),
            api_url,
            web_url,
            token_path,
            timeout_secs: profile
                .and_then(|p| p.timeout_secs)
                .unwrap_or(defaults.timeout_secs),
            token,
        }
    }

    /// The bearer token: the explicit one if given, otherwise the token file
    pub fn resolve_token(&self) -> anyhow::Result<String> {
        if let Some(token) = &self.token {
            return Ok(token.trim().to_string());
        }

        let path = Path::new(&self.token_path);
        if !path.exists() {
            bail!(
                "No API token configured. Run `vigia init` or set VIGIA_TOKEN (looked for {})",
                self.token_path
            );
        }

        let token = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read token file {}", self.token_path))?;

        Ok(token.trim().to_string())
    }

    pub fn client_config(&self) -> anyhow::Result<ClientConfig> {
        Ok(ClientConfig::new(self.resolve_token()?)
            .with_base_url(self.api_url.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}
