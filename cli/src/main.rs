#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
#![warn(clippy::expect_used)]

use crate::app_config::AppConfig;
use args::{CliArgs, Command};
use clap::{CommandFactory, Parser};
use commands::{
    browse::browse_cmd,
    completions::completions_cmd,
    config::config_cmd,
    connect,
    init::init_cmd,
    monitor::{create_cmd, delete_cmd, list_cmd, results_cmd, show_cmd},
    open::open_cmd,
};
use profile::{get_profile_path, Profile};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app_config;
mod args;
mod commands;
mod formatters;
mod profile;
mod prompts;
mod utils;

#[cfg(test)]
mod test;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let args = CliArgs::parse();

    let Some(command) = args.command else {
        CliArgs::command().print_help()?;
        return Ok(());
    };

    let profile_path = get_profile_path(&args.config.profile_path);
    let profile = Profile::from_path(&profile_path)?;
    let config = AppConfig::from_args(args.config, &profile_path, profile.as_ref());

    match command {
        Command::Config => config_cmd(&config),
        Command::Init => init_cmd(&config, &profile_path),
        Command::Completions { shell } => completions_cmd(shell),
        Command::Open(args) => open_cmd(&config, args),
        Command::List(args) => list_cmd(&mut connect(&config)?, args).await,
        Command::Create(args) => create_cmd(&mut connect(&config)?, args).await,
        Command::Show(args) => show_cmd(&mut connect(&config)?, args).await,
        Command::Results(args) => results_cmd(&mut connect(&config)?, args, &config.web_url).await,
        Command::Delete(args) => delete_cmd(&mut connect(&config)?, args).await,
        Command::Browse => browse_cmd(&mut connect(&config)?, &config.web_url).await,
    }
}

/// Logs go to stderr, filtered by `VIGIA_LOG`
fn setup_tracing() {
    let filter = EnvFilter::try_from_env("VIGIA_LOG").unwrap_or_else(|_| {
        format!(
            "{crate_name}=warn,vigia_core=warn",
            crate_name = env!("CARGO_CRATE_NAME")
        )
        .into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
