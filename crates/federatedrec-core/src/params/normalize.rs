//! Normalization of string-or-mapping parameter inputs.
//!
//! Early stop, optimizer and metrics may each be written in several shapes.
//! The `*Input` enums are the tagged boundary representation; the `parse_*`
//! functions turn them into one canonical record per field.
//!
//! ```
//! use federatedrec_core::params::normalize::{parse_early_stop, EarlyStopInput};
//! use federatedrec_core::param_map;
//!
//! let input = EarlyStopInput::try_from(param_map! { "early_stop" => "abs", "eps" => 0.01 }).unwrap();
//! let early_stop = parse_early_stop(&input).unwrap();
//! assert_eq!(early_stop.converge_func, "abs");
//! assert_eq!(early_stop.eps, 0.01);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_EPS, EARLY_STOP_KEY, EPS_KEY, OPTIMIZER_KEY};
use crate::error::{FederatedRecError, Result};
use crate::value::ParamValue;

/// Early-stop spec as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EarlyStopInput {
    /// A bare method name, e.g. `"diff"`.
    Name(String),
    /// `{"early_stop": <method>, "eps": <threshold>}`.
    Mapping(BTreeMap<String, ParamValue>),
}

/// Canonical early-stop policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarlyStop {
    /// Convergence method: `diff`, `weight_diff` or `abs`.
    pub converge_func: String,
    /// Convergence threshold.
    pub eps: f64,
}

/// Optimizer spec as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptimizerInput {
    /// A bare optimizer name, e.g. `"SGD"`.
    Name(String),
    /// `{"optimizer": <name>, ...kwargs}`.
    Mapping(BTreeMap<String, ParamValue>),
}

/// Canonical optimizer policy: a name plus free-form keyword arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Optimizer {
    pub optimizer: String,
    pub kwargs: BTreeMap<String, ParamValue>,
}

/// Metrics spec as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricsInput {
    #[default]
    Unset,
    One(String),
    Many(Vec<String>),
}

impl From<&str> for EarlyStopInput {
    fn from(value: &str) -> Self {
        EarlyStopInput::Name(value.to_string())
    }
}

impl From<EarlyStop> for EarlyStopInput {
    fn from(value: EarlyStop) -> Self {
        let mut map = BTreeMap::new();
        map.insert(
            EARLY_STOP_KEY.to_string(),
            ParamValue::String(value.converge_func),
        );
        map.insert(EPS_KEY.to_string(), ParamValue::Float(value.eps));
        EarlyStopInput::Mapping(map)
    }
}

impl TryFrom<ParamValue> for EarlyStopInput {
    type Error = FederatedRecError;

    fn try_from(value: ParamValue) -> Result<Self> {
        match value {
            ParamValue::String(s) => Ok(EarlyStopInput::Name(s)),
            ParamValue::Map(m) => Ok(EarlyStopInput::Mapping(m)),
            other => Err(FederatedRecError::InvalidType {
                field: EARLY_STOP_KEY.to_string(),
                type_name: other.type_name().to_string(),
            }),
        }
    }
}

impl From<&str> for OptimizerInput {
    fn from(value: &str) -> Self {
        OptimizerInput::Name(value.to_string())
    }
}

impl From<Optimizer> for OptimizerInput {
    fn from(value: Optimizer) -> Self {
        let mut map = value.kwargs;
        map.insert(
            OPTIMIZER_KEY.to_string(),
            ParamValue::String(value.optimizer),
        );
        OptimizerInput::Mapping(map)
    }
}

impl TryFrom<ParamValue> for OptimizerInput {
    type Error = FederatedRecError;

    fn try_from(value: ParamValue) -> Result<Self> {
        match value {
            ParamValue::String(s) => Ok(OptimizerInput::Name(s)),
            ParamValue::Map(m) => Ok(OptimizerInput::Mapping(m)),
            other => Err(FederatedRecError::InvalidType {
                field: OPTIMIZER_KEY.to_string(),
                type_name: other.type_name().to_string(),
            }),
        }
    }
}

impl From<&str> for MetricsInput {
    fn from(value: &str) -> Self {
        MetricsInput::One(value.to_string())
    }
}

impl From<Vec<String>> for MetricsInput {
    fn from(value: Vec<String>) -> Self {
        MetricsInput::Many(value)
    }
}

impl TryFrom<ParamValue> for MetricsInput {
    type Error = FederatedRecError;

    fn try_from(value: ParamValue) -> Result<Self> {
        let invalid = |v: &ParamValue| FederatedRecError::InvalidType {
            field: "metrics".to_string(),
            type_name: v.type_name().to_string(),
        };
        match value {
            ParamValue::None => Ok(MetricsInput::Unset),
            ParamValue::String(s) => Ok(MetricsInput::One(s)),
            ParamValue::List(items) => items
                .into_iter()
                .map(|item| match item {
                    ParamValue::String(s) => Ok(s),
                    other => Err(invalid(&other)),
                })
                .collect::<Result<Vec<_>>>()
                .map(MetricsInput::Many),
            other => Err(invalid(&other)),
        }
    }
}

/// Normalizes an early-stop spec.
///
/// A bare name uses [`DEFAULT_EPS`]. A mapping must carry a non-empty
/// `early_stop` entry; `eps` is optional but must be numeric when present.
pub fn parse_early_stop(input: &EarlyStopInput) -> Result<EarlyStop> {
    match input {
        EarlyStopInput::Name(name) => Ok(EarlyStop {
            converge_func: name.clone(),
            eps: DEFAULT_EPS,
        }),
        EarlyStopInput::Mapping(map) => {
            let invalid = || FederatedRecError::InvalidSpec {
                field: EARLY_STOP_KEY.to_string(),
                value: ParamValue::Map(map.clone()).to_string(),
            };
            let converge_func = match map.get(EARLY_STOP_KEY) {
                Some(ParamValue::String(s)) if !s.is_empty() => s.clone(),
                _ => return Err(invalid()),
            };
            let eps = match map.get(EPS_KEY) {
                None | Some(ParamValue::None) => DEFAULT_EPS,
                Some(v) => v.as_number().ok_or_else(|| {
                    FederatedRecError::invalid_param(
                        EARLY_STOP_KEY,
                        EPS_KEY,
                        v,
                        "should be 'int' or 'float'",
                    )
                })?,
            };
            Ok(EarlyStop { converge_func, eps })
        }
    }
}

/// Normalizes an optimizer spec.
///
/// A bare name has no keyword arguments. A mapping must carry a non-empty
/// string `optimizer` entry; every other entry becomes a keyword argument.
pub fn parse_optimizer(input: &OptimizerInput) -> Result<Optimizer> {
    match input {
        OptimizerInput::Name(name) => Ok(Optimizer {
            optimizer: name.clone(),
            kwargs: BTreeMap::new(),
        }),
        OptimizerInput::Mapping(map) => {
            let optimizer = match map.get(OPTIMIZER_KEY) {
                Some(ParamValue::String(s)) if !s.is_empty() => s.clone(),
                _ => {
                    return Err(FederatedRecError::InvalidSpec {
                        field: OPTIMIZER_KEY.to_string(),
                        value: ParamValue::Map(map.clone()).to_string(),
                    })
                }
            };
            let kwargs = map
                .iter()
                .filter(|(k, _)| k.as_str() != OPTIMIZER_KEY)
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            Ok(Optimizer { optimizer, kwargs })
        }
    }
}

/// Normalizes a metrics spec into an ordered list of metric names.
pub fn parse_metrics(input: &MetricsInput) -> Vec<String> {
    match input {
        MetricsInput::Unset => Vec::new(),
        MetricsInput::One(s) if s.is_empty() => Vec::new(),
        MetricsInput::One(s) => vec![s.clone()],
        MetricsInput::Many(items) => items.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param_map;
    use proptest::prelude::*;

    #[test]
    fn test_early_stop_from_name() {
        let es = parse_early_stop(&"diff".into()).unwrap();
        assert_eq!(es.converge_func, "diff");
        assert_eq!(es.eps, DEFAULT_EPS);
    }

    #[test]
    fn test_early_stop_from_mapping() {
        let input = EarlyStopInput::try_from(param_map! { "early_stop" => "abs", "eps" => 0.01 })
            .unwrap();
        let es = parse_early_stop(&input).unwrap();
        assert_eq!(
            es,
            EarlyStop {
                converge_func: "abs".to_string(),
                eps: 0.01
            }
        );

        let input =
            EarlyStopInput::try_from(param_map! { "early_stop" => "weight_diff" }).unwrap();
        assert_eq!(parse_early_stop(&input).unwrap().eps, DEFAULT_EPS);

        let input =
            EarlyStopInput::try_from(param_map! { "early_stop" => "abs", "eps" => 1 }).unwrap();
        assert_eq!(parse_early_stop(&input).unwrap().eps, 1.0);
    }

    #[test]
    fn test_early_stop_mapping_without_method_fails() {
        let input = EarlyStopInput::try_from(param_map! { "eps" => 0.01 }).unwrap();
        let err = parse_early_stop(&input).unwrap_err();
        assert!(matches!(err, FederatedRecError::InvalidSpec { .. }));
        assert_eq!(err.to_string(), r#"early_stop config: {"eps": 0.01} invalid"#);

        let input = EarlyStopInput::try_from(param_map! { "early_stop" => "" }).unwrap();
        parse_early_stop(&input).expect_err("empty method should be rejected");
    }

    #[test]
    fn test_early_stop_non_numeric_eps_fails() {
        let input =
            EarlyStopInput::try_from(param_map! { "early_stop" => "abs", "eps" => "small" })
                .unwrap();
        let err = parse_early_stop(&input).unwrap_err();
        assert_eq!(err.field(), Some("eps"));
    }

    #[test]
    fn test_early_stop_invalid_type() {
        let err = EarlyStopInput::try_from(ParamValue::Int(3)).unwrap_err();
        assert_eq!(err.to_string(), "invalid type for early_stop: int");
    }

    #[test]
    fn test_optimizer_from_name() {
        let opt = parse_optimizer(&"Adam".into()).unwrap();
        assert_eq!(opt.optimizer, "Adam");
        assert!(opt.kwargs.is_empty());
    }

    #[test]
    fn test_optimizer_mapping_collects_kwargs() {
        let input = OptimizerInput::try_from(param_map! {
            "optimizer" => "SGD",
            "learning_rate" => 0.05,
            "decay" => 1,
        })
        .unwrap();
        let opt = parse_optimizer(&input).unwrap();
        assert_eq!(opt.optimizer, "SGD");
        assert_eq!(opt.kwargs.len(), 2);
        assert_eq!(opt.kwargs["learning_rate"], ParamValue::Float(0.05));
        assert_eq!(opt.kwargs["decay"], ParamValue::Int(1));
    }

    #[test]
    fn test_optimizer_mapping_without_name_fails() {
        let input = OptimizerInput::try_from(param_map! { "learning_rate" => 0.05 }).unwrap();
        let err = parse_optimizer(&input).unwrap_err();
        assert!(matches!(err, FederatedRecError::InvalidSpec { .. }));

        let input = OptimizerInput::try_from(param_map! { "optimizer" => 3 }).unwrap();
        parse_optimizer(&input).expect_err("non-string optimizer name should be rejected");
    }

    #[test]
    fn test_optimizer_invalid_type() {
        let err = OptimizerInput::try_from(ParamValue::List(vec![])).unwrap_err();
        assert_eq!(err.to_string(), "invalid type for optimizer: list");
    }

    #[test]
    fn test_metrics_shapes() {
        assert!(parse_metrics(&MetricsInput::Unset).is_empty());
        assert!(parse_metrics(&"".into()).is_empty());
        assert_eq!(parse_metrics(&"rmse".into()), vec!["rmse"]);

        let input = MetricsInput::try_from(ParamValue::from(vec!["rmse", "mae"])).unwrap();
        assert_eq!(parse_metrics(&input), vec!["rmse", "mae"]);

        let input = MetricsInput::try_from(ParamValue::None).unwrap();
        assert_eq!(input, MetricsInput::Unset);
    }

    #[test]
    fn test_metrics_invalid_type() {
        let err = MetricsInput::try_from(ParamValue::Int(1)).unwrap_err();
        assert_eq!(err.to_string(), "invalid type for metrics: int");

        let err = MetricsInput::try_from(ParamValue::from(vec![1i64])).unwrap_err();
        assert_eq!(err.to_string(), "invalid type for metrics: int");
    }

    #[test]
    fn test_canonical_forms_are_fixed_points() {
        let es = EarlyStop {
            converge_func: "abs".to_string(),
            eps: 0.5,
        };
        assert_eq!(parse_early_stop(&es.clone().into()).unwrap(), es);

        let opt = parse_optimizer(
            &OptimizerInput::try_from(param_map! { "optimizer" => "Adam", "beta" => 0.9 })
                .unwrap(),
        )
        .unwrap();
        assert_eq!(parse_optimizer(&opt.clone().into()).unwrap(), opt);
    }

    proptest! {
        #[test]
        fn prop_name_uses_default_eps(name in "[a-z_]{1,16}") {
            let es = parse_early_stop(&EarlyStopInput::Name(name.clone())).unwrap();
            prop_assert_eq!(es.converge_func, name);
            prop_assert_eq!(es.eps, DEFAULT_EPS);
        }

        #[test]
        fn prop_mapping_without_method_fails(
            entries in proptest::collection::btree_map("[a-z]{1,8}", -10.0f64..10.0, 0..6)
        ) {
            let map: BTreeMap<String, ParamValue> = entries
                .into_iter()
                .filter(|(k, _)| k != EARLY_STOP_KEY)
                .map(|(k, v)| (k, ParamValue::Float(v)))
                .collect();
            prop_assert!(parse_early_stop(&EarlyStopInput::Mapping(map)).is_err());
        }

        #[test]
        fn prop_kwargs_are_all_keys_but_name(
            entries in proptest::collection::btree_map("[a-z_]{1,10}", -100i64..100, 0..8)
        ) {
            let mut map: BTreeMap<String, ParamValue> = entries
                .iter()
                .map(|(k, v)| (k.clone(), ParamValue::Int(*v)))
                .collect();
            map.insert(OPTIMIZER_KEY.to_string(), ParamValue::from("Adagrad"));
            let opt = parse_optimizer(&OptimizerInput::Mapping(map.clone())).unwrap();

            map.remove(OPTIMIZER_KEY);
            prop_assert_eq!(opt.optimizer, "Adagrad");
            prop_assert_eq!(opt.kwargs, map);
        }
    }
}
