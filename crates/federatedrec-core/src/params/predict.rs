//! Prediction parameters carried alongside a training config.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{expect_number, reject_unknown, BaseParam};
use crate::error::{FederatedRecError, Result};
use crate::value::ParamValue;

/// Prediction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictParam {
    /// Score above which an instance is predicted positive.
    pub threshold: f64,
}

impl Default for PredictParam {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

impl BaseParam for PredictParam {
    type Checked = ();

    const NAME: &'static str = "predict_param";

    fn from_values(values: &BTreeMap<String, ParamValue>) -> Result<Self> {
        reject_unknown(Self::NAME, values, &["threshold"])?;
        let mut param = Self::default();
        if let Some(v) = values.get("threshold") {
            param.threshold = expect_number(Self::NAME, "threshold", v)?;
        }
        Ok(param)
    }

    fn check(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(FederatedRecError::invalid_param(
                Self::NAME,
                "threshold",
                self.threshold,
                "should be a number in [0, 1]",
            ));
        }
        Ok(())
    }
}
