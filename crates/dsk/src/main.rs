//! DSK CLI - design definitions browser.
//!
//! Serves a directory of design definitions (one directory per component)
//! as a browsable catalogue with live component demos.

mod error;
mod output;
mod serve;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use error::CliError;
use output::Output;
use serve::ServeArgs;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// DSK - design definitions browser.
#[derive(Parser, Debug)]
#[command(name = "dsk", version, about)]
struct Cli {
    #[command(flatten)]
    serve: ServeArgs,
}

fn main() {
    let cli = Cli::parse();

    if cli.serve.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.serve.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(!cli.serve.no_color)
        .init();

    if let Err(err) = run(cli) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(cli.serve.execute(VERSION))
}
