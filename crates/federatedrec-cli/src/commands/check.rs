//! Check Command Implementation
//!
//! Validates a parameter file and prints the canonical parameters as JSON.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use federatedrec_core::{BaseParam, HeteroMatrixParam, MatrixFactorizationParam};
use serde::Serialize;
use tracing::info;

use super::load_with_overrides;

/// Which parameter object a file describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ParamKind {
    /// Matrix-factorization parameters shared by homo and hetero training
    Base,
    /// Hetero matrix-factorization parameters
    #[default]
    Hetero,
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamKind::Base => write!(f, "base"),
            ParamKind::Hetero => write!(f, "hetero"),
        }
    }
}

/// Validate a parameter file
///
/// Loads the JSON parameter file, applies any overrides, runs the full
/// check and prints the canonical parameters.
///
/// # Example
///
/// ```bash
/// federatedrec check --config mf.json --kind hetero --set batch_size=64
/// ```
#[derive(Args, Debug, Clone)]
pub struct CheckCommand {
    /// Path to the parameter file (JSON object)
    #[arg(long, short = 'c', env = "FEDERATEDREC_CONFIG")]
    pub config: PathBuf,

    /// Parameter object the file describes
    #[arg(long, short = 'k', value_enum, default_value = "hetero")]
    pub kind: ParamKind,

    /// Override a parameter, e.g. `--set init_param.embed_dim=16`
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

impl CheckCommand {
    /// Execute the check command, writing the canonical parameters to `out`.
    pub fn run(&self, out: &mut impl Write) -> Result<()> {
        info!("Checking {} parameters in {:?}", self.kind, self.config);
        match self.kind {
            ParamKind::Base => {
                let param: MatrixFactorizationParam =
                    load_with_overrides(&self.config, &self.overrides)?;
                let config = param.check().context("Parameter check failed")?;
                self.print(out, &config)
            }
            ParamKind::Hetero => {
                let param: HeteroMatrixParam = load_with_overrides(&self.config, &self.overrides)?;
                let config = param.check().context("Parameter check failed")?;
                self.print(out, &config)
            }
        }
    }

    fn print(&self, out: &mut impl Write, config: &impl Serialize) -> Result<()> {
        let text = if self.compact {
            serde_json::to_string(config)?
        } else {
            serde_json::to_string_pretty(config)?
        };
        writeln!(out, "{}", text)?;
        info!("Parameters are valid");
        Ok(())
    }
}
