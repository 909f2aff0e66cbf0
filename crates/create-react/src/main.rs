//! create-react CLI - scaffold a React project from the bundled template
//!
//! This is the main entry point for the command-line interface.

mod cli;
mod commands;
mod output;
mod version;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;

/// Environment variable holding the log filter (EnvFilter syntax)
const LOG_ENV: &str = "CREATE_REACT_LOG";

fn main() -> Result<()> {
    // Usage errors, --help, and --version exit here with clap's status codes
    let cli = Cli::parse();

    if cli.version {
        commands::version::run();
        return Ok(());
    }

    let Some(name) = cli.project_name else {
        unreachable!("clap enforces <project-name> without --version");
    };

    init_tracing();
    commands::create::run(name)
}

/// Initialize tracing from CREATE_REACT_LOG, warnings only by default
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
