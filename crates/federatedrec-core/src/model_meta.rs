//! Conversion between validated parameters and the persisted model-meta record.
//!
//! The record layout is owned by `federatedrec-proto` and shared with other
//! readers, so it is kept independent of the in-memory config types. Fields
//! the schema does not carry (prediction and cross-validation settings,
//! validation frequency, init method, `aggregate_iters`) come back as defaults
//! on restore.
//!
//! ```
//! use federatedrec_core::model_meta::ModelMeta;
//! use federatedrec_core::params::{BaseParam, HeteroMatrixConfig, HeteroMatrixParam};
//!
//! let config = HeteroMatrixParam::default().check().unwrap();
//! let bytes = config.to_bytes().unwrap();
//! let restored = HeteroMatrixConfig::from_bytes(&bytes).unwrap();
//! assert_eq!(restored, config);
//! ```

use std::collections::BTreeMap;

use federatedrec_proto::{EarlyStopParam, HeteroMfParam, MfOptimizerParam};
use prost::Message;
use tracing::debug;

use crate::consts::{EARLY_STOP_KEY, EPS_KEY, OPTIMIZER_KEY};
use crate::error::{FederatedRecError, Result};
use crate::params::normalize::{EarlyStopInput, MetricsInput, OptimizerInput};
use crate::params::{
    BaseParam, HeteroMatrixConfig, HeteroMatrixParam, MatrixFactorizationParam, MtxFInitParam,
};
use crate::value::ParamValue;

/// A validated config that can be persisted as a protobuf record.
pub trait ModelMeta: Sized {
    /// The protobuf message the config maps onto.
    type Pb: Message + Default;

    /// Maps the config onto its protobuf record.
    fn generate_pb(&self) -> Result<Self::Pb>;

    /// Rebuilds a validated config from a protobuf record.
    fn restore_from_pb(pb: &Self::Pb) -> Result<Self>;

    /// Encodes the config as protobuf bytes.
    fn to_bytes(&self) -> Result<Vec<u8>> {
        let bytes = self.generate_pb()?.encode_to_vec();
        debug!(len = bytes.len(), "Encoded model meta");
        Ok(bytes)
    }

    /// Decodes protobuf bytes and restores the config.
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let pb = Self::Pb::decode(bytes).map_err(|e| FederatedRecError::SerializationError {
            message: format!("failed to decode model meta: {}", e),
        })?;
        debug!(len = bytes.len(), "Decoded model meta");
        Self::restore_from_pb(&pb)
    }
}

fn to_i32(field: &str, value: i64) -> Result<i32> {
    i32::try_from(value).map_err(|_| FederatedRecError::SerializationError {
        message: format!("{} {} does not fit the int32 schema field", field, value),
    })
}

/// JSON has no encoding for NaN or infinities; serde_json writes them as `null`.
fn has_non_finite(value: &ParamValue) -> bool {
    match value {
        ParamValue::Float(v) => !v.is_finite(),
        ParamValue::List(items) => items.iter().any(has_non_finite),
        ParamValue::Map(map) => map.values().any(has_non_finite),
        _ => false,
    }
}

impl ModelMeta for HeteroMatrixConfig {
    type Pb = HeteroMfParam;

    fn generate_pb(&self) -> Result<HeteroMfParam> {
        let base = &self.base;
        if let Some((key, value)) = base.optimizer.kwargs.iter().find(|(_, v)| has_non_finite(v)) {
            return Err(FederatedRecError::SerializationError {
                message: format!(
                    "optimizer arg {} {} has a non-finite number and cannot be written as JSON",
                    key, value
                ),
            });
        }
        let args = serde_json::to_string(&base.optimizer.kwargs).map_err(|e| {
            FederatedRecError::SerializationError {
                message: format!("failed to encode optimizer args: {}", e),
            }
        })?;
        Ok(HeteroMfParam {
            secure_aggregate: base.secure_aggregate,
            aggregate_every_n_epoch: to_i32(
                "aggregate_every_n_epoch",
                base.aggregate_every_n_epoch,
            )?,
            batch_size: to_i32("batch_size", base.batch_size)?,
            max_iter: to_i32("max_iter", base.max_iter)?,
            early_stop: Some(EarlyStopParam {
                early_stop: base.early_stop.converge_func.clone(),
                eps: base.early_stop.eps,
            }),
            metrics: base.metrics.clone(),
            optimizer: Some(MfOptimizerParam {
                optimizer: base.optimizer.optimizer.clone(),
                args,
            }),
            loss: base.loss.clone(),
            embed_dim: to_i32("embed_dim", base.init_param.embed_dim)?,
        })
    }

    fn restore_from_pb(pb: &HeteroMfParam) -> Result<Self> {
        let early_stop = pb.early_stop.clone().unwrap_or_default();
        let mut early_stop_map = BTreeMap::new();
        early_stop_map.insert(
            EARLY_STOP_KEY.to_string(),
            ParamValue::String(early_stop.early_stop),
        );
        early_stop_map.insert(EPS_KEY.to_string(), ParamValue::Float(early_stop.eps));

        let optimizer = pb.optimizer.clone().unwrap_or_default();
        let mut optimizer_map: BTreeMap<String, ParamValue> = if optimizer.args.is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str(&optimizer.args).map_err(|e| {
                FederatedRecError::SerializationError {
                    message: format!("optimizer args {:?} are not a JSON object: {}", optimizer.args, e),
                }
            })?
        };
        optimizer_map.insert(
            OPTIMIZER_KEY.to_string(),
            ParamValue::String(optimizer.optimizer),
        );

        let param = HeteroMatrixParam {
            base: MatrixFactorizationParam {
                secure_aggregate: pb.secure_aggregate,
                aggregate_every_n_epoch: pb.aggregate_every_n_epoch.into(),
                early_stop: EarlyStopInput::Mapping(early_stop_map),
                optimizer: OptimizerInput::Mapping(optimizer_map),
                batch_size: pb.batch_size.into(),
                init_param: MtxFInitParam::new(pb.embed_dim.into()),
                max_iter: pb.max_iter.into(),
                metrics: MetricsInput::Many(pb.metrics.clone()),
                loss: pb.loss.clone(),
                ..Default::default()
            },
            ..Default::default()
        };
        param.check()
    }
}
