//! Parameter objects for federated matrix factorization.
//!
//! # Overview
//!
//! - [`MatrixFactorizationParam`]: hyperparameters shared by homo and hetero training.
//! - [`HeteroMatrixParam`]: the hetero specialization, which also owns the
//!   model-meta conversion in [`crate::model_meta`].
//! - [`MtxFInitParam`]: embedding initialization.
//! - [`PredictParam`], [`CrossValidationParam`], [`ValidationFreqs`]: sub-configs
//!   carried along for the surrounding framework.
//!
//! Raw parameter objects hold what the caller wrote. [`BaseParam::check`] is a
//! pure transformation: it either returns a validated, canonical value or an
//! error, and never touches `self`.

pub mod cross_validation;
pub mod hetero;
pub mod init;
pub mod matrix_factorization;
pub mod normalize;
pub mod predict;

use std::collections::BTreeMap;

use crate::error::{FederatedRecError, Result};
use crate::value::ParamValue;

pub use cross_validation::{CrossValidationParam, ValidationFreqs};
pub use hetero::{HeteroMatrixConfig, HeteroMatrixParam};
pub use init::{InitMethod, MtxFInitParam};
pub use matrix_factorization::{MatrixFactorizationConfig, MatrixFactorizationParam};
pub use normalize::{EarlyStop, EarlyStopInput, MetricsInput, Optimizer, OptimizerInput};
pub use predict::PredictParam;

/// Common interface of every parameter object.
pub trait BaseParam: Sized {
    /// The value produced by a successful [`check`](BaseParam::check).
    type Checked;

    /// Name used as the owner in error messages.
    const NAME: &'static str;

    /// Builds the parameter from a loosely-typed mapping, applying each
    /// recognized key over the defaults. Unknown keys are rejected.
    fn from_values(values: &BTreeMap<String, ParamValue>) -> Result<Self>;

    /// Validates the parameter.
    fn check(&self) -> Result<Self::Checked>;

    /// Builds the parameter from a [`ParamValue::Map`].
    fn from_value(value: &ParamValue) -> Result<Self> {
        match value {
            ParamValue::Map(values) => Self::from_values(values),
            other => Err(FederatedRecError::InvalidType {
                field: Self::NAME.to_string(),
                type_name: other.type_name().to_string(),
            }),
        }
    }
}

/// Fails on the first key in `values` that is not in `known`.
pub(crate) fn reject_unknown(
    owner: &str,
    values: &BTreeMap<String, ParamValue>,
    known: &[&str],
) -> Result<()> {
    match values.keys().find(|k| !known.contains(&k.as_str())) {
        None => Ok(()),
        Some(name) => {
            let similar = similar_keys(name, known);
            let suggestion = if similar.is_empty() {
                String::new()
            } else {
                format!(" (did you mean: [{}])", similar.join(","))
            };
            Err(FederatedRecError::UnknownParam {
                owner: owner.to_string(),
                name: name.clone(),
                suggestion,
            })
        }
    }
}

fn similar_keys(name: &str, known: &[&str]) -> Vec<String> {
    fn overlap(name: &str, key: &str) -> f32 {
        if name.len() < 3 || key.len() < 3 || !name.is_ascii() {
            return 0.0;
        }
        let trials = name.len() - 2;
        let matches = (0..trials)
            .filter(|&i| key.contains(&name[i..i + 3]))
            .count();
        matches as f32 / trials as f32
    }
    known
        .iter()
        .filter(|k| overlap(name, k) > 0.5)
        .map(|k| k.to_string())
        .collect()
}

pub(crate) fn expect_int(owner: &str, field: &str, value: &ParamValue) -> Result<i64> {
    value
        .as_int()
        .ok_or_else(|| FederatedRecError::invalid_param(owner, field, value, "should be int type"))
}

pub(crate) fn expect_bool(owner: &str, field: &str, value: &ParamValue) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| FederatedRecError::invalid_param(owner, field, value, "should be bool type"))
}

pub(crate) fn expect_number(owner: &str, field: &str, value: &ParamValue) -> Result<f64> {
    value.as_number().ok_or_else(|| {
        FederatedRecError::invalid_param(owner, field, value, "should be 'int' or 'float'")
    })
}

pub(crate) fn expect_string(owner: &str, field: &str, value: &ParamValue) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| FederatedRecError::invalid_param(owner, field, value, "should be str type"))
}
