//! SysuSurf command-line entry point

mod args;

use std::time::Duration;

use tracing::{info, warn};

use surf_capture::interface;
use surf_core::{Error, Result, SurfConfig};

use args::{Cli, Commands};

/// How long to wait for the worker to confirm the log-off after ctrl-c
const LOGOFF_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}

fn list_interfaces() {
    let interfaces = interface::list_interfaces();
    println!("{}", interface::available_devices_message(&interfaces));
}

fn load_config(path: &std::path::Path) -> Result<SurfConfig> {
    let text = std::fs::read_to_string(path)?;
    let config: SurfConfig = serde_json::from_str(&text)
        .map_err(|e| Error::config(format!("invalid configuration: {}", e)))?;
    config.validate()?;
    Ok(config)
}

async fn authenticate(path: &std::path::Path) -> Result<()> {
    let config = load_config(path)?;
    let supplicant = surf_eap::for_config(config)?;

    supplicant.start().await?;
    info!(dialect = supplicant.dialect(), "authenticating, press ctrl-c to log off");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("interrupt received, logging off");
            supplicant.stop().await?;
            if tokio::time::timeout(LOGOFF_DRAIN_TIMEOUT, supplicant.wait())
                .await
                .is_err()
            {
                warn!("worker did not confirm log off in time");
            }
            Ok(())
        }
        result = supplicant.wait() => result,
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Interfaces => {
            list_interfaces();
            Ok(())
        }
        Commands::Auth { config } => authenticate(&config).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
