//! Hetero matrix-factorization parameters.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::matrix_factorization::{MatrixFactorizationConfig, MatrixFactorizationParam};
use super::normalize::{EarlyStopInput, OptimizerInput};
use super::{expect_int, reject_unknown, BaseParam};
use crate::consts::{DEFAULT_AGGREGATE_ITERS, DEFAULT_EARLY_STOP, DEFAULT_HETERO_OPTIMIZER};
use crate::error::{FederatedRecError, Result};
use crate::value::ParamValue;

/// Arguments older hetero job configs pass that have no effect on matrix
/// factorization. They are accepted and dropped during ingestion.
const LEGACY_KEYS: &[&str] = &[
    "penalty",
    "tol",
    "alpha",
    "learning_rate",
    "decay",
    "decay_sqrt",
];

/// Parameters for hetero (vertically partitioned) matrix factorization.
///
/// Serialized with the base fields flattened. Deserializing goes through
/// [`BaseParam::from_values`], so serde input gets the hetero defaults and the
/// same key checks as any other ingestion path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeteroMatrixParam {
    #[serde(flatten)]
    pub base: MatrixFactorizationParam,
    /// How many iterations are aggregated at once.
    pub aggregate_iters: i64,
}

impl Default for HeteroMatrixParam {
    fn default() -> Self {
        Self {
            base: MatrixFactorizationParam {
                optimizer: OptimizerInput::from(DEFAULT_HETERO_OPTIMIZER),
                early_stop: EarlyStopInput::from(DEFAULT_EARLY_STOP),
                ..Default::default()
            },
            aggregate_iters: DEFAULT_AGGREGATE_ITERS,
        }
    }
}

impl<'de> Deserialize<'de> for HeteroMatrixParam {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = ParamValue::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

impl BaseParam for HeteroMatrixParam {
    type Checked = HeteroMatrixConfig;

    const NAME: &'static str = "matrix_factorization";

    fn from_values(values: &BTreeMap<String, ParamValue>) -> Result<Self> {
        let known: Vec<&str> = MatrixFactorizationParam::KEYS
            .iter()
            .chain(LEGACY_KEYS)
            .chain(&["aggregate_iters"])
            .copied()
            .collect();
        reject_unknown(Self::NAME, values, &known)?;

        let mut param = Self::default();
        param.base.apply_values(values)?;
        if let Some(v) = values.get("aggregate_iters") {
            param.aggregate_iters = expect_int(Self::NAME, "aggregate_iters", v)?;
        }
        Ok(param)
    }

    fn check(&self) -> Result<HeteroMatrixConfig> {
        let base = self.base.check()?;
        if self.aggregate_iters < 1 {
            return Err(FederatedRecError::invalid_param(
                Self::NAME,
                "aggregate_iters",
                self.aggregate_iters,
                "should be a positive int",
            ));
        }
        Ok(HeteroMatrixConfig {
            base,
            aggregate_iters: self.aggregate_iters,
        })
    }
}

/// Validated hetero matrix-factorization parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeteroMatrixConfig {
    #[serde(flatten)]
    pub(crate) base: MatrixFactorizationConfig,
    pub(crate) aggregate_iters: i64,
}

impl HeteroMatrixConfig {
    /// Returns the shared matrix-factorization settings.
    #[inline]
    pub fn base(&self) -> &MatrixFactorizationConfig {
        &self.base
    }

    #[inline]
    pub fn aggregate_iters(&self) -> i64 {
        self.aggregate_iters
    }
}

impl From<HeteroMatrixConfig> for HeteroMatrixParam {
    fn from(config: HeteroMatrixConfig) -> Self {
        Self {
            base: config.base.into(),
            aggregate_iters: config.aggregate_iters,
        }
    }
}
