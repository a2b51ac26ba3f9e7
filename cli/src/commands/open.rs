use anyhow::Context;
use tracing::debug;
use vigia_core::{navigate_to_case, CaseAction};

use crate::{app_config::AppConfig, args::OpenArgs};

pub fn open_cmd(config: &AppConfig, args: OpenArgs) -> anyhow::Result<()> {
    let action = if args.movements {
        CaseAction::Movements
    } else {
        CaseAction::Details
    };

    let cnj = args.cnj.trim();
    if cnj.is_empty() {
        anyhow::bail!("Please enter a case number.");
    }

    let url = navigate_to_case(cnj, action).url(&config.web_url);
    follow_link(&url, args.print)
}

/// Open `url` in the system browser, or print it
pub fn follow_link(url: &str, print_only: bool) -> anyhow::Result<()> {
    if print_only {
        println!("{}", url);
        return Ok(());
    }

    debug!(url = %url, "opening case in browser");
    webbrowser::open(url).with_context(|| format!("Failed to open browser for {}", url))?;
    println!("Opened {}", url);
    Ok(())
}
