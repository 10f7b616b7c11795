//! Matrix-factorization hyperparameters shared by homo and hetero training.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cross_validation::{CrossValidationParam, ValidationFreqs};
use super::init::MtxFInitParam;
use super::normalize::{
    parse_early_stop, parse_metrics, parse_optimizer, EarlyStop, EarlyStopInput, MetricsInput,
    Optimizer, OptimizerInput,
};
use super::predict::PredictParam;
use super::{expect_bool, expect_int, expect_string, reject_unknown, BaseParam};
use crate::consts::{
    DEFAULT_EARLY_STOP, DEFAULT_LOSS, DEFAULT_MAX_ITER, DEFAULT_OPTIMIZER, FULL_BATCH,
    MIN_BATCH_SIZE, NON_NEGATIVE_OPTIMIZER_ARGS,
};
use crate::error::{FederatedRecError, Result};
use crate::value::ParamValue;

/// Matrix-factorization parameters as written by the caller.
///
/// `early_stop`, `optimizer` and `metrics` keep whatever shape the caller
/// used; [`BaseParam::check`] turns them into canonical records.
///
/// # Examples
///
/// ```
/// use federatedrec_core::params::{BaseParam, MatrixFactorizationParam};
///
/// let param = MatrixFactorizationParam {
///     batch_size: 32,
///     max_iter: 20,
///     ..Default::default()
/// };
/// let config = param.check().unwrap();
/// assert_eq!(config.optimizer().optimizer, "SGD");
/// assert_eq!(config.early_stop().converge_func, "diff");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatrixFactorizationParam {
    pub secure_aggregate: bool,
    /// Aggregate every this many epochs.
    pub aggregate_every_n_epoch: i64,
    pub early_stop: EarlyStopInput,
    pub optimizer: OptimizerInput,
    /// Mini-batch size; `-1` uses all data in one batch.
    pub batch_size: i64,
    pub init_param: MtxFInitParam,
    pub max_iter: i64,
    pub predict_param: PredictParam,
    pub cv_param: CrossValidationParam,
    pub validation_freqs: Option<ValidationFreqs>,
    pub metrics: MetricsInput,
    pub loss: String,
}

impl Default for MatrixFactorizationParam {
    fn default() -> Self {
        Self {
            secure_aggregate: true,
            aggregate_every_n_epoch: 1,
            early_stop: EarlyStopInput::from(DEFAULT_EARLY_STOP),
            optimizer: OptimizerInput::from(DEFAULT_OPTIMIZER),
            batch_size: FULL_BATCH,
            init_param: MtxFInitParam::default(),
            max_iter: DEFAULT_MAX_ITER,
            predict_param: PredictParam::default(),
            cv_param: CrossValidationParam::default(),
            validation_freqs: None,
            metrics: MetricsInput::Unset,
            loss: DEFAULT_LOSS.to_string(),
        }
    }
}

impl MatrixFactorizationParam {
    pub(crate) const KEYS: &'static [&'static str] = &[
        "secure_aggregate",
        "aggregate_every_n_epoch",
        "early_stop",
        "optimizer",
        "batch_size",
        "init_param",
        "max_iter",
        "predict_param",
        "cv_param",
        "validation_freqs",
        "metrics",
        "loss",
    ];

    /// Applies every recognized key in `values` onto `self`, ignoring others.
    pub(crate) fn apply_values(&mut self, values: &BTreeMap<String, ParamValue>) -> Result<()> {
        let owner = Self::NAME;
        for (key, value) in values {
            match key.as_str() {
                "secure_aggregate" => self.secure_aggregate = expect_bool(owner, key, value)?,
                "aggregate_every_n_epoch" => {
                    self.aggregate_every_n_epoch = expect_int(owner, key, value)?
                }
                "early_stop" => self.early_stop = EarlyStopInput::try_from(value.clone())?,
                "optimizer" => self.optimizer = OptimizerInput::try_from(value.clone())?,
                "batch_size" => self.batch_size = expect_int(owner, key, value)?,
                "init_param" => self.init_param = MtxFInitParam::from_value(value)?,
                "max_iter" => self.max_iter = expect_int(owner, key, value)?,
                "predict_param" => self.predict_param = PredictParam::from_value(value)?,
                "cv_param" => self.cv_param = CrossValidationParam::from_value(value)?,
                "validation_freqs" => {
                    self.validation_freqs = ValidationFreqs::from_value(owner, value)?
                }
                "metrics" => self.metrics = MetricsInput::try_from(value.clone())?,
                "loss" => self.loss = expect_string(owner, key, value)?,
                _ => {}
            }
        }
        Ok(())
    }
}

impl BaseParam for MatrixFactorizationParam {
    type Checked = MatrixFactorizationConfig;

    const NAME: &'static str = "matrix_factorization";

    fn from_values(values: &BTreeMap<String, ParamValue>) -> Result<Self> {
        reject_unknown(Self::NAME, values, Self::KEYS)?;
        let mut param = Self::default();
        param.apply_values(values)?;
        Ok(param)
    }

    fn check(&self) -> Result<MatrixFactorizationConfig> {
        let owner = Self::NAME;

        let early_stop = parse_early_stop(&self.early_stop)?;
        let optimizer = parse_optimizer(&self.optimizer)?;
        let metrics = parse_metrics(&self.metrics);

        if self.batch_size != FULL_BATCH && self.batch_size < MIN_BATCH_SIZE {
            return Err(FederatedRecError::invalid_param(
                owner,
                "batch_size",
                self.batch_size,
                format!(
                    "should be larger than {} or {} represent for all data",
                    MIN_BATCH_SIZE, FULL_BATCH
                ),
            ));
        }

        for key in NON_NEGATIVE_OPTIMIZER_ARGS {
            if let Some(value) = optimizer.kwargs.get(key) {
                match value.as_number() {
                    Some(v) if v.is_finite() && v >= 0.0 => {}
                    _ => {
                        return Err(FederatedRecError::invalid_param(
                            owner,
                            &format!("optimizer.{}", key),
                            value,
                            "should be a finite 'int' or 'float' and not negative",
                        ))
                    }
                }
            }
        }

        self.init_param.check()?;
        self.predict_param.check()?;
        self.cv_param.check()?;
        if let Some(freqs) = &self.validation_freqs {
            freqs.check(owner)?;
        }

        if self.max_iter < 1 {
            return Err(FederatedRecError::invalid_param(
                owner,
                "max_iter",
                self.max_iter,
                "should be greater or equal to 1",
            ));
        }

        debug!(
            optimizer = %optimizer.optimizer,
            early_stop = %early_stop.converge_func,
            batch_size = self.batch_size,
            max_iter = self.max_iter,
            "Validated matrix factorization params"
        );

        Ok(MatrixFactorizationConfig {
            secure_aggregate: self.secure_aggregate,
            aggregate_every_n_epoch: self.aggregate_every_n_epoch,
            early_stop,
            optimizer,
            batch_size: self.batch_size,
            init_param: self.init_param.clone(),
            max_iter: self.max_iter,
            predict_param: self.predict_param.clone(),
            cv_param: self.cv_param.clone(),
            validation_freqs: self.validation_freqs.clone(),
            metrics,
            loss: self.loss.clone(),
        })
    }
}

/// Validated matrix-factorization parameters in canonical form.
///
/// Only produced by [`MatrixFactorizationParam::check`] and by restoring model
/// metadata, so every value here has passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixFactorizationConfig {
    pub(crate) secure_aggregate: bool,
    pub(crate) aggregate_every_n_epoch: i64,
    pub(crate) early_stop: EarlyStop,
    pub(crate) optimizer: Optimizer,
    pub(crate) batch_size: i64,
    pub(crate) init_param: MtxFInitParam,
    pub(crate) max_iter: i64,
    pub(crate) predict_param: PredictParam,
    pub(crate) cv_param: CrossValidationParam,
    pub(crate) validation_freqs: Option<ValidationFreqs>,
    pub(crate) metrics: Vec<String>,
    pub(crate) loss: String,
}

impl MatrixFactorizationConfig {
    #[inline]
    pub fn secure_aggregate(&self) -> bool {
        self.secure_aggregate
    }

    #[inline]
    pub fn aggregate_every_n_epoch(&self) -> i64 {
        self.aggregate_every_n_epoch
    }

    #[inline]
    pub fn early_stop(&self) -> &EarlyStop {
        &self.early_stop
    }

    #[inline]
    pub fn optimizer(&self) -> &Optimizer {
        &self.optimizer
    }

    #[inline]
    pub fn batch_size(&self) -> i64 {
        self.batch_size
    }

    /// Returns true when training uses all data in a single batch.
    #[inline]
    pub fn is_full_batch(&self) -> bool {
        self.batch_size == FULL_BATCH
    }

    #[inline]
    pub fn init_param(&self) -> &MtxFInitParam {
        &self.init_param
    }

    #[inline]
    pub fn max_iter(&self) -> i64 {
        self.max_iter
    }

    #[inline]
    pub fn predict_param(&self) -> &PredictParam {
        &self.predict_param
    }

    #[inline]
    pub fn cv_param(&self) -> &CrossValidationParam {
        &self.cv_param
    }

    #[inline]
    pub fn validation_freqs(&self) -> Option<&ValidationFreqs> {
        self.validation_freqs.as_ref()
    }

    #[inline]
    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    #[inline]
    pub fn loss(&self) -> &str {
        &self.loss
    }
}

impl From<MatrixFactorizationConfig> for MatrixFactorizationParam {
    fn from(config: MatrixFactorizationConfig) -> Self {
        Self {
            secure_aggregate: config.secure_aggregate,
            aggregate_every_n_epoch: config.aggregate_every_n_epoch,
            early_stop: config.early_stop.into(),
            optimizer: config.optimizer.into(),
            batch_size: config.batch_size,
            init_param: config.init_param,
            max_iter: config.max_iter,
            predict_param: config.predict_param,
            cv_param: config.cv_param,
            validation_freqs: config.validation_freqs,
            metrics: MetricsInput::Many(config.metrics),
            loss: config.loss,
        }
    }
}
