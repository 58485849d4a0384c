//! Service API facade (svcApi)
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                   svc-api                    │
//!                        │                                              │
//!   Client Request       │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!   ─────────────────────┼─▶│  http   │──▶│   svc    │──▶│  backend  │──┼──▶ svc service
//!                        │  │ request │   │ handlers │   │  invoker  │  │    (RPC gateway)
//!                        │  └─────────┘   └────┬─────┘   └───────────┘  │
//!                        │                     │                        │
//!   Client Response      │  ┌─────────┐        ▼                        │
//!   ◀────────────────────┼──│response │◀── OutboundResponse              │
//!                        │  └─────────┘                                 │
//!                        │                                              │
//!                        │  config · observability · lifecycle          │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use svc_api::backend::HttpSvcBackend;
use svc_api::config::{load_config, ApiConfig};
use svc_api::http::HttpServer;
use svc_api::lifecycle::{spawn_signal_handler, Shutdown};
use svc_api::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "svc-api")]
#[command(about = "HTTP facade for the svc backend service", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, env = "SVC_API_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ApiConfig::default(),
    };

    logging::init_logging(&config.observability);

    tracing::info!(
        service = %config.service.name,
        version = %config.service.version,
        "svc-api starting"
    );
    tracing::info!(
        bind_address = %config.listener.bind_address,
        backend = %config.backend.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let backend = Arc::new(HttpSvcBackend::new(&config.backend)?);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config, backend, shutdown);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
