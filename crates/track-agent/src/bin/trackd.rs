//! Main binary for the slurmtrack daemon (trackd)

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use track_agent::{init_logging, DashboardServer, Result};
use track_core::TrackerConfig;
use tracing::info;

#[derive(Parser)]
#[command(name = "trackd")]
#[command(about = "Cluster and system metrics dashboard daemon")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Bind port override
    #[arg(long, value_name = "PORT")]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dashboard server (default)
    Serve,
    /// Generate default configuration
    Config {
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate configuration
    Validate {
        /// Configuration file to validate
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { output }) => generate_config(output),
        Some(Commands::Validate { config }) => validate_config(&config),
        Some(Commands::Serve) | None => serve(cli.config, cli.log_level, cli.port).await,
    }
}

async fn serve(
    config_path: Option<PathBuf>,
    log_level: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let mut config = load_config(config_path.as_deref())?;

    // Apply CLI overrides
    if let Some(level) = log_level {
        config.logging.level = level;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;

    init_logging(&config.logging)?;

    let mut server = DashboardServer::new(&config)?;
    server.start().await?;
    if let Some(addr) = server.local_addr() {
        info!("Dashboard available at http://{}/", addr);
    }

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, stopping server");
    server.stop().await;

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<TrackerConfig> {
    match path {
        Some(path) => {
            let config = TrackerConfig::from_file(path)?;
            println!("Loaded configuration from: {}", path.display());
            Ok(config)
        }
        None => Ok(TrackerConfig::default()),
    }
}

fn generate_config(output: Option<PathBuf>) -> Result<()> {
    let config = TrackerConfig::default();

    if let Some(output_path) = output {
        config.to_file(&output_path)?;
        println!("Generated configuration file: {}", output_path.display());
    } else {
        let yaml = serde_yaml::to_string(&config).map_err(track_core::Error::from)?;
        println!("{yaml}");
    }

    Ok(())
}

fn validate_config(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {}", config_path.display());

    let config = TrackerConfig::from_file(config_path)?;

    println!("Configuration is valid");
    println!("Server bind address: {}", config.bind_addr()?);
    println!(
        "Poll interval: {}s",
        config.monitoring.poll_interval_seconds
    );
    println!(
        "API key auth: {}",
        if config.security.api_key.is_some() {
            "enabled"
        } else {
            "disabled"
        }
    );

    Ok(())
}
