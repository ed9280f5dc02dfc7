//! engined — the engine session daemon.
//!
//! Single binary that assembles the session service:
//! - Service configuration (TOML file + environment overrides)
//! - Discovery client (engine inventory over HTTP)
//! - Engine selector (capacity filter + configured strategy)
//! - Session opener (WebSocket document handshake)
//! - REST surface (axum)
//!
//! # Usage
//!
//! ```text
//! engined --config /etc/engined/engined.toml
//! SESSION_STRATEGY=leastload SESSIONS_PER_ENGINE_THRESHOLD=100 engined
//! ```

mod api;
mod service;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use engine_balancer::EngineSelector;
use engine_discovery::DiscoveryClient;
use engine_session::SessionOpener;

#[derive(Parser)]
#[command(name = "engined", about = "Engine session daemon")]
struct Cli {
    /// Path to a TOML config file. Environment variables override it.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,engined=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    // Configuration problems are fatal here, before any request is served.
    let config = engine_core::ServiceConfig::load(cli.config.as_deref())?;
    info!(
        strategy = %config.strategy,
        threshold = ?config.session_threshold,
        discovery = %format!("{}:{}", config.discovery_host, config.discovery_port),
        "configuration loaded"
    );

    let discovery = DiscoveryClient::new(&config.discovery_host, config.discovery_port);
    let selector = EngineSelector::new(config.strategy, config.session_threshold);
    let opener = SessionOpener::new(config.session_ttl_secs);
    let service = Arc::new(service::SessionService::new(discovery, selector, opener));

    let app = api::build_router(service);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
