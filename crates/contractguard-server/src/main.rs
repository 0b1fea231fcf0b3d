//! ContractGuard server binary
//!
//! Starts the HTTP API. Configuration comes from a TOML file when one is
//! given, otherwise from defaults; `GEMINI_API_KEY` and `PORT` override
//! either.

use clap::Parser;
use contractguard_server::{config::ServerConfig, init_tracing, start_server, ServerError};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "contractguard-server")]
#[command(about = "ContractGuard contract analysis API", long_about = None)]
#[command(version)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "CONTRACTGUARD_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args = Args::parse();

    let config = match args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::from_env()?,
    };

    start_server(config).await
}
