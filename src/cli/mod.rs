//! Command-line surface: the subcommand table and its dispatcher.

mod commands;

use clap::{CommandFactory, Parser, Subcommand};

use crate::commit::Interaction;
use crate::error::CommitError;
use crate::git::Vcs;

/// Smart git assistant: stage, suggest, and commit from the terminal.
#[derive(Parser, Debug)]
#[command(name = "raven")]
#[command(about = "Smart git assistant: stage, suggest, and commit from the terminal")]
#[command(version)]
pub struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the working tree status
    #[command(visible_alias = "s")]
    Status,

    /// Interactively stage files for commit
    #[command(visible_alias = "a")]
    Add {
        /// Pass `.` to stage everything without prompting
        #[arg(value_parser = ["."])]
        all: Option<String>,
    },

    /// Remove files from the index, keeping working tree changes
    #[command(visible_alias = "rs")]
    Unstage {
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Interactively generate and apply a commit message
    #[command(visible_aliases = ["c", "ci"])]
    Commit {
        /// Commit with this message, skipping the review screen
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Stage all changes and commit
    #[command(visible_aliases = ["ac", "snap"])]
    Save {
        /// Commit with this message, skipping the review screen
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Amend the last commit message and/or staged files
    Amend {
        /// Replace the message without opening the review screen
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Stage all changes and fold them into the last commit
    #[command(visible_alias = "f")]
    Fix {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Undo the last commit, keeping its changes staged
    Undo,

    /// Suggest a commit message for the staged changes
    Suggest {
        /// Print the suggestion as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse commit activity by day
    Stats {
        /// Print the six-month heatmap instead of the interactive calendar
        #[arg(long)]
        heatmap: bool,
    },
}

/// Help sections and the commands listed under each, in display order.
pub const COMMAND_GROUPS: &[(&str, &[&str])] = &[
    (
        "WORKFLOW",
        &["status", "add", "unstage", "commit", "save", "undo", "fix", "amend"],
    ),
    ("INSIGHTS", &["stats"]),
    ("SYSTEM", &["suggest", "help"]),
];

/// Grouped command listing shown after the generated help.
pub fn grouped_help() -> String {
    let root = Cli::command();
    let mut out = String::new();

    for (title, names) in COMMAND_GROUPS {
        out.push_str(&format!("{title}\n"));
        for name in *names {
            let Some(cmd) = root.find_subcommand(name) else {
                if *name == "help" {
                    out.push_str(&format!("  {:<10} {:<14} Print help\n", name, ""));
                }
                continue;
            };
            let aliases: Vec<&str> = cmd.get_visible_aliases().collect();
            let alias_text = if aliases.is_empty() {
                String::new()
            } else {
                format!("[alias: {}]", aliases.join(", "))
            };
            let about = cmd.get_about().map(|a| a.to_string()).unwrap_or_default();
            out.push_str(&format!("  {:<10} {:<14} {}\n", name, alias_text, about));
        }
        out.push('\n');
    }

    out.trim_end().to_string()
}

/// Parse arguments with the grouped command listing attached to `--help`.
pub fn parse() -> Cli {
    let matches = Cli::command().after_help(grouped_help()).get_matches();
    match <Cli as clap::FromArgMatches>::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    }
}

/// Run one command against the repository.
pub fn dispatch(
    command: &Command,
    vcs: &dyn Vcs,
    interaction: &mut dyn Interaction,
) -> Result<(), CommitError> {
    match command {
        Command::Status => commands::status(vcs),
        Command::Add { all } => commands::add(vcs, interaction, all.is_some()),
        Command::Unstage { paths } => commands::unstage(vcs, paths),
        Command::Commit { message } => commands::commit(vcs, interaction, message.clone()),
        Command::Save { message } => commands::save(vcs, interaction, message.clone()),
        Command::Amend { message } => commands::amend(vcs, interaction, message.clone()),
        Command::Fix { yes } => commands::fix(vcs, *yes),
        Command::Undo => commands::undo(vcs),
        Command::Suggest { json } => commands::suggest(vcs, *json),
        Command::Stats { heatmap } => commands::stats(vcs, *heatmap),
    }
}
