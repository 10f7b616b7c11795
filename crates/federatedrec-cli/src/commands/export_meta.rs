//! Export Meta Command Implementation
//!
//! Validates hetero parameters and writes the binary model-meta record.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use federatedrec_core::{BaseParam, HeteroMatrixParam, ModelMeta};
use tracing::{info, warn};

use super::load_with_overrides;

/// Write the model-meta record for a parameter file
///
/// # Example
///
/// ```bash
/// federatedrec export-meta --config mf.json --output mf_meta.pb
/// ```
#[derive(Args, Debug, Clone)]
pub struct ExportMetaCommand {
    /// Path to the hetero parameter file (JSON object)
    #[arg(long, short = 'c', env = "FEDERATEDREC_CONFIG")]
    pub config: PathBuf,

    /// Output path for the encoded record
    #[arg(long, short = 'o', env = "FEDERATEDREC_META_PATH")]
    pub output: PathBuf,

    /// Override a parameter, e.g. `--set max_iter=20`
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,

    /// Overwrite an existing output file
    #[arg(long)]
    pub overwrite: bool,
}

impl ExportMetaCommand {
    /// Execute the export-meta command
    pub fn run(&self) -> Result<()> {
        info!("Exporting model meta from {:?}", self.config);

        if self.output.exists() {
            if self.overwrite {
                warn!("Output path exists, overwriting: {:?}", self.output);
            } else {
                anyhow::bail!(
                    "Output path already exists: {:?}. Use --overwrite to replace.",
                    self.output
                );
            }
        }

        let param: HeteroMatrixParam = load_with_overrides(&self.config, &self.overrides)?;
        let config = param.check().context("Parameter check failed")?;
        let bytes = config.to_bytes().context("Failed to encode model meta")?;

        if let Some(parent) = self.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).context("Failed to create output directory")?;
        }
        std::fs::write(&self.output, &bytes)
            .with_context(|| format!("Failed to write {:?}", self.output))?;

        info!(bytes = bytes.len(), "Model meta written to: {:?}", self.output);
        Ok(())
    }
}
