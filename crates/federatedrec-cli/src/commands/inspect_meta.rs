//! Inspect Meta Command Implementation
//!
//! Decodes a model-meta record and prints the restored parameters.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use federatedrec_core::{HeteroMatrixConfig, ModelMeta};
use federatedrec_proto::HeteroMfParam;
use prost::Message;
use tracing::info;

/// Print the parameters stored in a model-meta record
///
/// # Example
///
/// ```bash
/// federatedrec inspect-meta --input mf_meta.pb
/// ```
#[derive(Args, Debug, Clone)]
pub struct InspectMetaCommand {
    /// Path to the encoded record
    #[arg(long, short = 'i', env = "FEDERATEDREC_META_PATH")]
    pub input: PathBuf,

    /// Print the decoded protobuf record as stored, without restoring it
    #[arg(long)]
    pub raw: bool,
}

impl InspectMetaCommand {
    /// Execute the inspect-meta command, writing the result to `out`.
    pub fn run(&self, out: &mut impl Write) -> Result<()> {
        info!("Inspecting model meta at {:?}", self.input);
        let bytes = std::fs::read(&self.input)
            .with_context(|| format!("Failed to read {:?}", self.input))?;

        if self.raw {
            let pb = HeteroMfParam::decode(bytes.as_slice())
                .with_context(|| format!("Failed to decode {:?}", self.input))?;
            writeln!(out, "{:#?}", pb)?;
            return Ok(());
        }

        let config =
            HeteroMatrixConfig::from_bytes(&bytes).context("Failed to restore model meta")?;
        writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
        Ok(())
    }
}
