use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crashlens::dataset::{load_csv, DatasetHandle};
use crashlens::query::QueryEngine;
use crashlens::server::Server;

/// Crash-record query daemon: loads the merged CSV once and serves the
/// filter API on localhost.
#[derive(Debug, Parser)]
#[command(name = "crashlensd", version)]
struct Args {
    /// Path to the merged crash CSV.
    #[arg(long, default_value = "data/crashes.csv")]
    data: PathBuf,

    /// Port to bind on 127.0.0.1.
    #[arg(long, default_value_t = 5000)]
    port: u16,

    /// Cap on loaded rows; unset loads the whole file. The full extract is
    /// around 2M rows; 200000 keeps startup fast on a laptop.
    #[arg(long)]
    max_rows: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    log::info!("loading {} ...", args.data.display());
    let dataset = load_csv(&args.data, args.max_rows)?;
    log::info!("{} records loaded", dataset.len());

    let engine = QueryEngine::new(DatasetHandle::new(dataset));
    let bind = SocketAddr::from(([127, 0, 0, 1], args.port));
    let mut server = Server::new(bind, engine).await?;
    log::info!("listening on {}", server.addr());

    tokio::signal::ctrl_c().await?;
    log::info!("shutting down");
    server.shutdown()?;
    Ok(())
}
