use anyhow::Context;
use vigia_core::{HttpMonitorClient, Session};

use crate::app_config::AppConfig;

pub mod browse;
pub mod completions;
pub mod config;
pub mod init;
pub mod monitor;
pub mod open;

pub type MonitorSession = Session<HttpMonitorClient>;

/// Build a session against the configured API
pub fn connect(config: &AppConfig) -> anyhow::Result<MonitorSession> {
    let client = HttpMonitorClient::new(config.client_config()?)
        .context("Failed to set up the API client")?;
    Ok(Session::new(client))
}
