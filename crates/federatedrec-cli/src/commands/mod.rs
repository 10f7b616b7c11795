//! CLI Command Implementations
//!
//! - [`check`]: parameter file validation
//! - [`export_meta`]: model-meta record export
//! - [`inspect_meta`]: model-meta record inspection

mod check;
mod export_meta;
mod inspect_meta;

pub use check::{CheckCommand, ParamKind};
pub use export_meta::ExportMetaCommand;
pub use inspect_meta::InspectMetaCommand;

use std::path::Path;

use anyhow::{Context, Result};
use federatedrec_core::config::parse_values;
use federatedrec_core::BaseParam;

use crate::overrides::apply_overrides;

/// Reads a parameter file, applies `--set` overrides and builds the parameter.
pub(crate) fn load_with_overrides<P: BaseParam>(path: &Path, overrides: &[String]) -> Result<P> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read parameter file {:?}", path))?;
    let mut values = parse_values(&text)
        .with_context(|| format!("Failed to parse parameter file {:?}", path))?;
    apply_overrides(&mut values, overrides)?;
    P::from_value(&values).with_context(|| format!("Invalid parameter file {:?}", path))
}
