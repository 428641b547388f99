//! cfdmgrd - cloudflared configuration manager daemon entry point

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use cfd_service::{ServiceControl, ShellRunner};
use cfd_settings::{ConfigStore, FileStore, Settings};
use cfdmgrd::reconcile::{reconcile, ReconcileAction};
use cfdmgrd::render;

/// Default location of the configuration document.
const DEFAULT_CONFIG_PATH: &str = "/var/db/cfdmgr/config.json";

#[derive(Parser)]
#[command(
    name = "cfdmgrd",
    about = "Configuration and lifecycle manager for the cloudflared tunnel daemon"
)]
struct Cli {
    /// Path to the configuration document
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the cloudflared YAML configuration file
    GenerateConfig {
        /// Write to this path instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Dump the full settings document as JSON
    SettingsJson,
    /// Exit 0 when the daemon is enabled, 1 otherwise
    IsEnabled,
    /// Query the daemon's running state
    Status,
    /// Query the daemon's version
    Version,
    /// Start or stop the daemon to match the enabled flag
    Reconcile,
}

/// Initializes tracing/logging subsystem
fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("cfdmgrd failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let store = FileStore::new(&cli.config);
    let control = ServiceControl::new(ShellRunner);

    match cli.command {
        Command::GenerateConfig { output } => {
            let doc = store.load().await?;
            let yaml = render::to_yaml(&render::render_config(&doc))?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, &yaml)
                        .await
                        .with_context(|| format!("writing config to {}", path.display()))?;
                    info!(path = %path.display(), "Daemon config written");
                }
                None => print!("{}", yaml),
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::SettingsJson => {
            let doc = store.load().await?;
            println!("{}", serde_json::to_string_pretty(&doc)?);
            Ok(ExitCode::SUCCESS)
        }

        Command::IsEnabled => {
            let enabled = Settings::new(store).is_enabled().await?;
            Ok(if enabled {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Command::Status => {
            let status = control.status().await;
            println!("{}: {}", status.state, status.message);
            Ok(ExitCode::SUCCESS)
        }

        Command::Version => {
            println!("{}", control.version().await.version);
            Ok(ExitCode::SUCCESS)
        }

        Command::Reconcile => {
            let enabled = Settings::new(store).is_enabled().await?;
            match reconcile(enabled, &control).await? {
                ReconcileAction::Started => info!("Daemon started"),
                ReconcileAction::Stopped => info!("Daemon stopped"),
                ReconcileAction::NoChange => info!("Daemon state unchanged"),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
