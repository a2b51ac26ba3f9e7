use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::args::CliArgs;

pub fn completions_cmd(shell: Shell) -> anyhow::Result<()> {
    let mut cmd = CliArgs::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
    Ok(())
}
