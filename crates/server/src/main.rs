//! `mipsim-server`: serves the MIPS pipeline simulator over HTTP.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mipsim_core::{Config, Simulator};
use mipsim_server::error::ServerError;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "mipsim-server",
    author,
    version,
    about = "HTTP API for the MIPS five-stage pipeline simulator",
    long_about = "Serves one shared simulator instance.\n\nRoutes:\n  GET  /api/health\n  GET  /api/state\n  POST /api/load?start=0      (body: hex words or assembly)\n  POST /api/step?cycles=1\n  POST /api/reset?clearRegs=1&clearMem=1&pc=0"
)]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// TCP port.
    #[arg(long, env = "MIPSIM_PORT", default_value_t = 8080)]
    port: u16,

    /// Simulator configuration (JSON). Built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), ServerError> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let app = mipsim_server::router(mipsim_server::shared(Simulator::new(&config)));

    let addr = format!("{}:{}", args.host, args.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
