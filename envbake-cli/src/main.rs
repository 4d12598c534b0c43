//! envbake: scaffold per-environment copies of a project skeleton.
//!
//! # Usage
//!
//! ```text
//! envbake bake [SOURCE] [--solution <name>] [--root <dir>] [--repos ask|all|none] [--dry-run]
//! envbake provision <env-dir>
//! envbake envs
//! ```

mod commands;
mod prompt;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{bake::BakeArgs, provision::ProvisionArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "envbake",
    version,
    about = "Copy a project skeleton into SANDBOX/DEV/STAGE/PREPROD/PROD environments",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Copy a source directory into every environment of a solution.
    Bake(BakeArgs),

    /// Create a GitHub repository for an existing environment directory and push it.
    Provision(ProvisionArgs),

    /// List the environment prefixes in scaffolding order.
    Envs,
}

// ---------------------------------------------------------------------------
// Shared repository mode argument
// ---------------------------------------------------------------------------

/// Which environments get a remote repository after copying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepoMode {
    /// Ask once per successfully copied environment.
    #[default]
    Ask,
    /// Provision every successfully copied environment.
    All,
    /// Skip repository setup.
    None,
}

impl FromStr for RepoMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ask" => Ok(Self::Ask),
            "all" => Ok(Self::All),
            "none" => Ok(Self::None),
            other => Err(format!(
                "unknown repository mode '{other}'; expected: ask, all, none"
            )),
        }
    }
}

impl fmt::Display for RepoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoMode::Ask => write!(f, "ask"),
            RepoMode::All => write!(f, "all"),
            RepoMode::None => write!(f, "none"),
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Bake(args) => args.run(),
        Commands::Provision(args) => args.run(),
        Commands::Envs => commands::envs::run(),
    }
}
