//! Server startup.

use std::path::PathBuf;

use clap::Args;
use dsk_config::{CliSettings, Config};
use dsk_server::{run_server, server_config_from_dsk_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for serving a catalogue.
#[derive(Args, Debug)]
pub(crate) struct ServeArgs {
    /// Design definitions root (default: config value or current directory).
    pub root: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover dsk.toml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long, env = "DSK_HOST")]
    pub host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long, env = "DSK_PORT")]
    pub port: Option<u16>,

    /// Leave directories starting with a dot out of the tree.
    #[arg(long)]
    pub skip_hidden: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output (info level logs and a startup scan).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Load configuration and run the server until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            root: self.root,
            skip_hidden: self.skip_hidden.then_some(true),
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::info!(
            config = ?config.config_path,
            root = %config.catalog_resolved.root.display(),
            skip_hidden = config.catalog_resolved.skip_hidden,
            "Configuration loaded"
        );
        let server_config = server_config_from_dsk_config(&config, version.to_owned(), self.verbose);

        output.banner(
            version,
            config.config_path.as_deref(),
            &server_config.root,
            &format!("http://{}:{}", server_config.host, server_config.port),
        );

        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))
    }
}
