use std::fs;
use std::path::Path;

use anyhow::Context;
use cliclack::{input, password};
use tracing::info;

use crate::{app_config::AppConfig, profile::Profile};

/// Ask for the service URLs and token, then write the profile and token file
pub fn init_cmd(defaults: &AppConfig, profile_path: &Path) -> anyhow::Result<()> {
    cliclack::intro(format!("Profile {}", profile_path.display()))?;

    let profile = Profile {
        api_url: Some(read_url("Monitor API URL", &defaults.api_url)?),
        web_url: Some(read_url("Web front end URL", &defaults.web_url)?),
        token_path: Some(defaults.token_path.clone()),
        timeout_secs: Some(defaults.timeout_secs),
    };

    let token: String = password("API token")
        .mask('▪')
        .interact()
        .context("Couldn't read API token")?;

    profile.save(profile_path)?;
    save_token_securely(&defaults.token_path, token.trim())?;
    info!(profile = %profile_path.display(), "profile initialized");

    cliclack::outro(format!("Token saved to {}", defaults.token_path))?;
    Ok(())
}

fn read_url(prompt: &str, default: &str) -> anyhow::Result<String> {
    input(prompt)
        .placeholder(default)
        .default_input(default)
        .required(true)
        .interact()
        .with_context(|| format!("Couldn't read {}", prompt))
}

fn save_token_securely(token_path: &str, token: &str) -> anyhow::Result<()> {
    let path = Path::new(token_path);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create token directory")?;
    }

    fs::write(path, token).context("Failed to write token file")?;

    // owner read/write only
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }

    Ok(())
}
