//! federatedrec CLI - validate parameter files and work with model metadata.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use federatedrec_cli::{Cli, Commands};

fn main() -> Result<()> {
    // Logs go to stderr so command output on stdout stays machine-readable.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("federatedrec=info".parse()?))
        .init();

    let cli = Cli::parse();

    info!("federatedrec CLI starting...");

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Commands::Check(cmd) => cmd.run(&mut stdout)?,
        Commands::ExportMeta(cmd) => cmd.run()?,
        Commands::InspectMeta(cmd) => cmd.run(&mut stdout)?,
    }

    info!("federatedrec CLI completed successfully");
    Ok(())
}
