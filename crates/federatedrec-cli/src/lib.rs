//! federatedrec CLI Library
//!
//! This crate provides the command-line interface for federatedrec
//! matrix-factorization parameters:
//!
//! - **Check**: validate a parameter file and print its canonical form
//! - **ExportMeta**: validate a hetero parameter file and write the model-meta record
//! - **InspectMeta**: decode a model-meta record and print the restored parameters
//!
//! # Example
//!
//! ```bash
//! # Validate a parameter file, overriding one value
//! federatedrec check --config mf.json --set max_iter=20
//!
//! # Write the binary model-meta record
//! federatedrec export-meta --config mf.json --output mf_meta.pb
//!
//! # Read it back
//! federatedrec inspect-meta --input mf_meta.pb
//! ```

pub mod commands;
pub mod overrides;

use clap::{Parser, Subcommand};

pub use commands::{CheckCommand, ExportMetaCommand, InspectMetaCommand, ParamKind};

/// federatedrec - federated matrix-factorization parameter tools
#[derive(Parser, Debug)]
#[command(name = "federatedrec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a parameter file and print the canonical parameters
    Check(CheckCommand),

    /// Validate hetero parameters and write the binary model-meta record
    ExportMeta(ExportMetaCommand),

    /// Decode a model-meta record and print the restored parameters
    InspectMeta(InspectMetaCommand),
}

/// Result type alias for CLI operations
pub type CliResult<T> = anyhow::Result<T>;
