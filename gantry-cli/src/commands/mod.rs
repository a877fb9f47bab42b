//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod deploy;
mod run;

pub use deploy::DeployArgs;
pub use run::RunArgs;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Deploy a new image to a cluster service
    Deploy(DeployArgs),
    /// Execute a one-off task on the cluster
    Run(RunArgs),
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Deploy(args) => deploy::handle_deploy(args, config).await,
        Commands::Run(args) => run::handle_run(args, config).await,
    }
}
