//! Deploy command handler

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use colored::*;
use gantry_deploy::ServiceDeployer;

use crate::config::Config;

/// Arguments for `gantry deploy`
#[derive(Args)]
pub struct DeployArgs {
    /// Name of the cluster
    #[arg(short, long)]
    cluster: String,

    /// Name of the service to deploy
    #[arg(short = 'n', long)]
    service_name: String,

    /// Image to deploy, e.g. repo/app:latest; omit to redeploy the current
    /// image with a fresh revision
    #[arg(short, long)]
    image: Option<String>,

    /// Seconds to wait for the new revision to be running
    #[arg(short, long, default_value_t = 300)]
    timeout: u64,

    /// Roll the service back to the previous revision if the deploy does
    /// not converge in time
    #[arg(long)]
    enable_rollback: bool,
}

/// Handle the deploy command
pub async fn handle_deploy(args: DeployArgs, config: &Config) -> Result<()> {
    let control_plane = Arc::new(config.control_plane());

    let deployer = ServiceDeployer::new(
        control_plane,
        &args.cluster,
        &args.service_name,
        args.image.as_deref(),
        Duration::from_secs(args.timeout),
        args.enable_rollback,
    )?;

    let outcome = deployer.deploy().await?;

    println!("{}", "Deploy success".green().bold());
    println!(
        "  {} {} {}",
        outcome.previous_revision,
        "->".dimmed(),
        outcome.deployed_revision.bold()
    );
    Ok(())
}
