//! # Robot Telemetry API Server
//!
//! Serves the robot status snapshot over HTTP, checks a snapshot file once, or prints
//! the effective configuration.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

use robot_telemetry::bootstrap::TelemetryServer;
use robot_telemetry::config::{ConfigManager, TelemetryConfig};
use robot_telemetry::logging::init_structured_logging;
use robot_telemetry::services::{StatusError, StatusService};
use robot_telemetry::store::FileStatusStore;

#[derive(Parser)]
#[command(name = "robot-telemetry")]
#[command(about = "Read-only HTTP API for a robot's live telemetry")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Configuration directory containing robot-telemetry.yaml (default: ./config)
    #[arg(short, long, global = true)]
    config_dir: Option<PathBuf>,

    /// Environment section to apply (development, test, production)
    #[arg(short, long, global = true)]
    environment: Option<String>,

    /// Snapshot file to read, overriding configuration
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    Serve {
        /// Address to listen on, overriding configuration
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Read and validate the snapshot once, then exit
    Check,

    /// Print the effective configuration as YAML
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("robot-telemetry: {e:#}");
            1
        }
    };

    process::exit(exit_code);
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let manager = load_config(&cli)?;
    let mut config = manager.config().clone();

    if let Some(data_file) = &cli.data_file {
        config.store.data_file = data_file.clone();
    }

    match cli.command.unwrap_or(Commands::Serve { bind: None }) {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.web.bind_address = bind;
            }
            config.validate().context("invalid configuration")?;
            serve(&config, &manager).await?;
            Ok(0)
        }
        Commands::Check => check(&config).await,
        Commands::Config => {
            let effective = ConfigManager::from_config(config, manager.environment())?;
            print!("{}", effective.to_yaml()?);
            Ok(0)
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Arc<ConfigManager>> {
    let manager = match &cli.environment {
        Some(environment) => ConfigManager::load_from_directory_with_env(
            cli.config_dir.clone(),
            &environment.to_lowercase(),
        ),
        None => ConfigManager::load_from_directory(cli.config_dir.clone()),
    };
    manager.context("failed to load configuration")
}

async fn serve(config: &TelemetryConfig, manager: &ConfigManager) -> anyhow::Result<()> {
    init_structured_logging(&config.logging)?;
    manager.log_summary();

    info!(
        environment = manager.environment(),
        version = env!("CARGO_PKG_VERSION"),
        "Starting robot telemetry API"
    );

    let server = TelemetryServer::bind(config).await?;
    let local_addr = server.local_addr();

    server
        .run_until(async move {
            if let Err(e) = signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
                return;
            }
            info!(%local_addr, "Shutdown signal received");
        })
        .await?;

    Ok(())
}

/// Exit codes: 0 valid, 1 unreadable, 2 schema violations
async fn check(config: &TelemetryConfig) -> anyhow::Result<i32> {
    let store = Arc::new(FileStatusStore::new(&config.store.data_file));
    let service = StatusService::new(store);

    match service.full_status().await {
        Ok(status) => {
            println!("{}", serde_json::to_string_pretty(&status)?);
            Ok(0)
        }
        Err(StatusError::Validation { details }) => {
            eprintln!(
                "{}: {} field error(s)",
                config.store.data_file.display(),
                details.len()
            );
            for detail in details {
                eprintln!("  {detail}");
            }
            Ok(2)
        }
        Err(e) => {
            eprintln!("{}: {e}", config.store.data_file.display());
            Ok(1)
        }
    }
}
