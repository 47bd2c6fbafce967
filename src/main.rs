//! `rosterd`: the student record service binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use roster::{FileStorage, Result, Server, ServerConfig, Store, DEFAULT_DATA_FILE};

#[derive(Debug, Parser)]
#[command(name = "rosterd")]
#[command(about = "HTTP service for student records backed by a JSON file")]
struct Args {
    /// Path to the backing JSON document.
    #[arg(long, default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Listen address.
    #[arg(long, default_value = "127.0.0.1:5000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let store = Store::new(FileStorage::new(&args.data_file));
    let server = Server::new(ServerConfig { addr: args.bind }, store);

    server.run().await
}
