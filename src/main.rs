//! urlshort
//!
//! Redirects request paths to destination URLs, falling through an ordered
//! chain of lookup tables.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server ──▶ structured table (YAML/JSON file)
//!                                            │ miss
//!                                            ▼
//!                                      static table (config)
//!                                            │ miss
//!                                            ▼
//!                                      default greeting
//!
//!     hit at any step ──▶ 302 Found, Location: <url>
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use urlshort::config::{self, ServiceConfig};
use urlshort::handler::DataFormat;
use urlshort::lifecycle::{self, signals, Shutdown};
use urlshort::observability;
use urlshort::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "urlshort", version, about = "Path-based HTTP redirect service")]
struct Args {
    /// Path to the redirect records file, YAML or JSON [default: url.yml]
    #[arg(long = "yml", value_name = "FILE")]
    yml: Option<PathBuf>,

    /// Format of the redirect records file; inferred from its extension when omitted
    #[arg(long, value_name = "FORMAT")]
    format: Option<DataFormat>,

    /// Optional TOML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Args {
    /// Load the config file, if any, and apply command-line overrides.
    fn into_config(self) -> Result<ServiceConfig, config::ConfigError> {
        let mut service_config = match &self.config {
            Some(path) => config::load_config(path)?,
            None => ServiceConfig::default(),
        };

        service_config
            .mappings
            .apply_overrides(self.yml, self.format);

        Ok(service_config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let service_config = Args::parse().into_config()?;

    observability::init_logging(&service_config.logging)?;

    tracing::info!("urlshort v{} starting", env!("CARGO_PKG_VERSION"));

    let chain = lifecycle::build_chain(&service_config).map_err(|e| {
        tracing::error!(error = %e, "Startup aborted");
        e
    })?;

    let listener = lifecycle::bind_listener(&service_config.listener).await?;

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::shutdown_on_signal(&signal_shutdown).await;
    });

    HttpServer::new(chain)
        .run(listener, server_shutdown)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "HTTP server failed");
            e
        })?;

    tracing::info!("Shutdown complete");
    Ok(())
}
