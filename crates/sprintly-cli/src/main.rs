//! sprintly - Sprint.ly work items in your terminal.

mod commands;
mod hook;
mod setup;
mod term;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "sprintly")]
#[command(author, version, about = "Sprint.ly work items in your terminal")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List your stories, tasks, defects, and tests (the default)
    #[command(alias = "ls")]
    List,

    /// Create or update stored credentials and default product
    Setup,

    /// Manage the git commit-msg hook
    #[command(subcommand)]
    Hook(HookCommands),
}

#[derive(Subcommand)]
enum HookCommands {
    /// Symlink the commit-msg hook into the current repository
    Install,

    /// Remove a previously installed commit-msg hook
    Uninstall,

    /// Rewrite a commit message file (invoked by the installed hook)
    #[command(hide = true)]
    Run {
        /// Path to the commit message file
        message_file: std::path::PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        None | Some(Commands::List) => commands::list(),
        Some(Commands::Setup) => commands::setup(),
        Some(Commands::Hook(HookCommands::Install)) => hook::install(),
        Some(Commands::Hook(HookCommands::Uninstall)) => hook::uninstall(),
        Some(Commands::Hook(HookCommands::Run { message_file })) => hook::run(&message_file),
    }
}
