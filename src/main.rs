//! raven - CLI entry point.

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use raven::cli::{self, dispatch};
use raven::config::Settings;
use raven::git::open_repository;
use raven::tui::TerminalInteraction;

fn main() -> Result<()> {
    let cli = cli::parse();
    let settings = Settings::from_env(cli.verbose);

    // Step 1: Logging goes to stderr so it never mixes with command output
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::new(&settings.log_filter))
        .init();

    // Step 2: Pre-flight checks
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let git = open_repository(&settings, &cwd)
        .context("raven must be run from within a git repository")?;

    // Step 3: Run the command
    let mut interaction = TerminalInteraction;
    dispatch(&cli.command, &git, &mut interaction).context("Command failed")?;

    Ok(())
}
