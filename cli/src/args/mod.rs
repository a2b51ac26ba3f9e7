use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::utils::date_filter::DateFilter;

#[derive(Parser, Debug)]
#[command(
    name = "vigia",
    version,
    about,
    long_about = "Manage new-case monitors on the legal-records API"
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Debug, Args, Serialize)]
pub struct ConfigArgs {
    /// Profile name, or path to a profile configuration file
    #[arg(long, short, env = "VIGIA_PROFILE", global = true)]
    pub profile_path: Option<String>,

    /// Base URL of the monitor API
    #[arg(long, env = "VIGIA_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Base URL of the web front end that case links point to
    #[arg(long, env = "VIGIA_WEB_URL", global = true)]
    pub web_url: Option<String>,

    /// API bearer token (overrides the profile's token file)
    #[arg(long, env = "VIGIA_TOKEN", hide_env_values = true, global = true)]
    #[serde(skip)]
    pub token: Option<String>,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum Command {
    /// Prints out current configuration
    Config,
    /// Initializes a new profile
    Init,
    /// Lists monitors
    List(ListArgs),
    /// Creates a new monitor
    Create(CreateArgs),
    /// Shows details of a monitor
    Show(ShowArgs),
    /// Lists cases found by a monitor
    Results(ShowArgs),
    /// Deletes a monitor
    Delete(DeleteArgs),
    /// Opens a found case in the web front end
    Open(OpenArgs),
    /// Browses monitors interactively
    Browse,
    /// Generates shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Clone, ValueEnum, PartialEq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Plain,
    Json,
}

#[derive(Debug, Args, PartialEq)]
pub struct ListArgs {
    /// Only monitors created on this day (e.g., "today", "yesterday", "2024-03-16")
    #[arg(long, value_name = "DATE", value_parser = parse_date_filter)]
    pub date: Option<DateFilter>,

    /// Output format (pretty, plain, or json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,
}

#[derive(Debug, Args, PartialEq)]
pub struct CreateArgs {
    /// Main search term
    #[arg(value_name = "TERM")]
    pub term: Vec<String>,

    /// Variation of the term (repeatable)
    #[arg(long = "variation", value_name = "TEXT")]
    pub variations: Vec<String>,

    /// Results must contain this term (repeatable)
    #[arg(long, value_name = "TEXT")]
    pub contains: Vec<String>,

    /// Results must not contain this term (repeatable)
    #[arg(long, value_name = "TEXT")]
    pub not_contains: Vec<String>,

    /// Results must contain at least one of these terms (repeatable)
    #[arg(long, value_name = "TEXT")]
    pub contains_any: Vec<String>,

    /// Restrict to these courts (can be specified multiple times or comma-separated)
    #[arg(long = "court", value_name = "COURTS", value_delimiter = ',', value_parser = parse_court)]
    pub courts: Vec<String>,

    /// Fill in the form interactively
    #[arg(long, short, default_value_t = false)]
    pub interactive: bool,

    /// Output format (pretty, plain, or json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,
}

#[derive(Debug, Args, PartialEq)]
pub struct ShowArgs {
    /// Monitor ID
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Output format (pretty, plain, or json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,
}

#[derive(Debug, Args, PartialEq)]
pub struct DeleteArgs {
    /// Monitor ID
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Output format of the reloaded list (pretty, plain, or json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,
}

#[derive(Debug, Args, PartialEq)]
pub struct OpenArgs {
    /// CNJ case number
    #[arg(value_name = "CNJ")]
    pub cnj: String,

    /// Open the case movements instead of its details
    #[arg(long, short)]
    pub movements: bool,

    /// Print the link instead of opening a browser
    #[arg(long)]
    pub print: bool,
}

pub fn parse_date_filter(s: &str) -> anyhow::Result<DateFilter> {
    s.parse()
}

pub fn parse_court(s: &str) -> anyhow::Result<String> {
    Ok(vigia_core::parse_court(s)?)
}
