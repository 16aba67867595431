//! REST server entry point

use clap::Parser;
use facilitator_server::config::AppConfig;
use facilitator_server::infrastructure::server;
use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(
    name = "facilitator-server",
    version,
    about = "REST gateway for the idea/critic facilitator agent"
)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// REST API bind address (overrides config if specified)
    #[arg(long)]
    addr: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    init_tracing();
    info!("Starting facilitator REST server");

    let mut config = AppConfig::load(args.config.as_deref())?;
    debug!(
        backend = config.model.backend.as_str(),
        model = config.model.name.as_str(),
        project = config.deployment.project.as_str(),
        location = config.deployment.location.as_str(),
        bucket = %config.deployment.staging_bucket(),
        "Configuration loaded"
    );

    if let Some(addr) = args.addr {
        config.rest_server.bind = addr;
    }

    let cache = facilitator_server::build_cache(&config)?;
    server::serve(cache, &config.rest_server).await?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .init();
}
