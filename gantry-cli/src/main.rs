//! Gantry CLI
//!
//! Command-line interface for deploying images to cluster services and
//! running one-off cluster tasks.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gantry")]
#[command(about = "Deploy images and run one-off tasks on a cluster scheduler", long_about = None)]
struct Cli {
    /// Control plane URL
    #[arg(
        long,
        env = "GANTRY_CONTROL_PLANE_URL",
        default_value = "http://localhost:8080"
    )]
    control_plane_url: String,

    /// Bearer token for the control plane
    #[arg(long, env = "GANTRY_AUTH_TOKEN")]
    auth_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gantry_deploy=info,gantry_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config {
        control_plane_url: cli.control_plane_url,
        auth_token: cli.auth_token,
    };

    handle_command(cli.command, &config).await
}
