//! HTTP server for DSK design definitions.
//!
//! Serves the catalogue browser on top of `dsk-tree`:
//! - `/` index page with the navigation sidebar
//! - `/api/tree` the whole tree as a JSend envelope
//! - `/tree/<node>` node pages (documentation, demos, children)
//! - `/embed/<node>` demo stages plus bundled node CSS and JS
//! - `/assets/<file>` frontend files from `dsk-assets`
//!
//! Every request path reaching the catalogue is checked with
//! [`dsk_tree::validate`] first.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use dsk_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         root: PathBuf::from("/srv/catalog"),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod jsend;
mod middleware;
mod state;
mod views;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Absolute catalogue root directory.
    pub root: PathBuf,
    /// Leave out hidden directories when listing the tree.
    pub skip_hidden: bool,
    /// Name shown in the index page.
    pub project_name: String,
    /// Enable verbose output.
    pub verbose: bool,
    /// Application version (for `ETag` computation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            root: PathBuf::from("."),
            skip_hidden: false,
            project_name: "DSK".to_string(),
            verbose: false,
            version: String::new(),
        }
    }
}

impl ServerConfig {
    /// Socket address the server binds to.
    ///
    /// # Errors
    ///
    /// Returns an error if host and port do not form a valid address.
    pub fn addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        SocketAddr::from_str(&format!("{}:{}", self.host, self.port))
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.addr()?;

    // Surfaces ghosted nodes at startup instead of on the first request.
    if config.verbose {
        let builder = dsk_tree::TreeBuilder::new(&config.root).skip_hidden(config.skip_hidden);
        match builder.build() {
            Ok(tree) => {
                tracing::info!(root = %config.root.display(), nodes = tree.len(), "Catalogue scanned");
            }
            Err(e) => tracing::warn!(error = %e, "Catalogue scan failed"),
        }
    }

    let state = Arc::new(AppState {
        root: config.root,
        skip_hidden: config.skip_hidden,
        project_name: config.project_name,
        version: config.version,
    });

    let app = app::create_router(state);

    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        // Without a handler the server runs until the process is killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from DSK config.
///
/// # Arguments
///
/// * `config` - DSK configuration
/// * `version` - Application version
/// * `verbose` - Enable verbose output
#[must_use]
pub fn server_config_from_dsk_config(
    config: &dsk_config::Config,
    version: String,
    verbose: bool,
) -> ServerConfig {
    let catalog = &config.catalog_resolved;
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        root: catalog.root.clone(),
        skip_hidden: catalog.skip_hidden,
        project_name: catalog.project_name(),
        verbose,
        version,
    }
}
