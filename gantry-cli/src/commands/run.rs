//! Run command handler

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use colored::*;
use gantry_deploy::TaskRunner;

use crate::config::Config;

/// Arguments for `gantry run`
#[derive(Args)]
pub struct RunArgs {
    /// Name of the cluster
    #[arg(short, long)]
    cluster: String,

    /// Name of the container whose command is overridden
    #[arg(short = 'n', long)]
    container_name: String,

    /// Image to run, e.g. repo/job:latest; omit to use the base
    /// definition's image
    #[arg(short, long)]
    image: Option<String>,

    /// Command to run, shell-quoted; empty runs the container's default
    #[arg(long, default_value = "")]
    command: String,

    /// Base task definition reference to run from
    #[arg(short = 'd', long)]
    base_task_definition: String,

    /// Seconds to wait for the task to exit
    #[arg(short, long, default_value_t = 300)]
    timeout: u64,
}

/// Handle the run command
pub async fn handle_run(args: RunArgs, config: &Config) -> Result<()> {
    let control_plane = Arc::new(config.control_plane());

    let runner = TaskRunner::new(
        control_plane,
        &args.cluster,
        &args.container_name,
        args.image.as_deref(),
        &args.command,
        &args.base_task_definition,
        Duration::from_secs(args.timeout),
    )?;

    let outcome = runner.run().await?;

    println!("{}", "Run task success".green().bold());
    println!("  definition: {}", outcome.task_definition.bold());
    for arn in &outcome.task_arns {
        println!("  task: {}", arn);
    }
    Ok(())
}
