use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use modelarena::api::{serve, ServerState};
use modelarena::config::{api_key, load_config};
use modelarena::ArenaError;

/// Compare hosted chat models on a single prompt.
#[derive(Debug, Parser)]
#[command(name = "modelarena", version, about)]
struct Args {
    /// Address to bind, overriding the config file
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overriding the config file
    #[arg(long)]
    port: Option<u16>,

    /// Path to a TOML config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), ArenaError> {
    env_logger::init();
    let args = Args::parse();

    let mut config = load_config(args.config)?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    let state = ServerState::from_config(&config, api_key()?)?;
    log::info!(
        "Comparing {} models via {}",
        config.models.len(),
        config.base_url
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| ArenaError::ConfigError(format!("Invalid bind address: {e}")))?;
    serve(state, addr).await
}
