//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the redirect chain leaf-first: default → static table → structured source
//! - Read the structured source from disk
//! - Bind the listener last, once the chain exists
//!
//! # Design Decisions
//! - Fail fast: an unreadable or malformed source is fatal
//! - No partial chain is ever handed to the server

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{ListenerConfig, ServiceConfig};
use crate::handler::{
    structured_handler, DataFormat, DefaultHandler, Handler, MapHandler, ParseError, PathMap,
};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The redirect source could not be read.
    #[error("unable to read redirect data from {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The redirect source was read but could not be decoded.
    #[error("unable to parse redirect data from {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// The listener could not be bound.
    #[error("unable to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Read a redirect source wholesale.
pub fn read_source(path: &Path) -> Result<Vec<u8>, StartupError> {
    fs::read(path).map_err(|source| StartupError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Build the full chain described by `config`, reading the structured source from disk.
pub fn build_chain(config: &ServiceConfig) -> Result<Arc<dyn Handler>, StartupError> {
    let path = &config.mappings.path;
    let format = config.mappings.effective_format();

    tracing::info!(path = %path.display(), format = %format, "Loading redirect data");

    let data = read_source(path)?;

    build_chain_from_bytes(config, format, &data).map_err(|source| StartupError::Parse {
        path: path.clone(),
        source,
    })
}

/// Bind the configured listen address.
pub async fn bind_listener(config: &ListenerConfig) -> Result<TcpListener, StartupError> {
    let listener = TcpListener::bind(&config.bind_address)
        .await
        .map_err(|source| {
            tracing::error!(
                bind_address = %config.bind_address,
                error = %source,
                "Failed to bind listener"
            );
            StartupError::Bind {
                address: config.bind_address.clone(),
                source,
            }
        })?;

    if let Ok(addr) = listener.local_addr() {
        tracing::info!(address = %addr, "Listener bound");
    }
    Ok(listener)
}

/// Build the full chain over already-read structured data.
pub fn build_chain_from_bytes(
    config: &ServiceConfig,
    format: DataFormat,
    data: &[u8],
) -> Result<Arc<dyn Handler>, ParseError> {
    let default: Arc<dyn Handler> = Arc::new(DefaultHandler::new(config.greeting.body.clone()));

    let static_paths: PathMap = config.redirects.0.clone();
    let static_count = static_paths.len();
    let static_handler: Arc<dyn Handler> = Arc::new(MapHandler::new(static_paths, default));

    let structured = structured_handler(format, data, static_handler)?;

    tracing::info!(
        structured_paths = structured.len(),
        static_paths = static_count,
        "Redirect chain built"
    );

    Ok(Arc::new(structured))
}
