//! Cross-validation settings and validation frequency.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{expect_bool, expect_int, expect_string, reject_unknown, BaseParam};
use crate::consts::{ARBITER, GUEST, HETERO, HOMO, HOST};
use crate::error::{FederatedRecError, Result};
use crate::value::ParamValue;

/// K-fold cross-validation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossValidationParam {
    pub n_splits: i64,
    /// `hetero` or `homo`.
    pub mode: String,
    /// `guest`, `host` or `arbiter`.
    pub role: String,
    pub shuffle: bool,
    pub random_seed: i64,
    pub need_cv: bool,
}

impl Default for CrossValidationParam {
    fn default() -> Self {
        Self {
            n_splits: 5,
            mode: HETERO.to_string(),
            role: GUEST.to_string(),
            shuffle: true,
            random_seed: 1,
            need_cv: false,
        }
    }
}

impl BaseParam for CrossValidationParam {
    type Checked = ();

    const NAME: &'static str = "cv_param";

    fn from_values(values: &BTreeMap<String, ParamValue>) -> Result<Self> {
        reject_unknown(
            Self::NAME,
            values,
            &["n_splits", "mode", "role", "shuffle", "random_seed", "need_cv"],
        )?;
        let mut param = Self::default();
        if let Some(v) = values.get("n_splits") {
            param.n_splits = expect_int(Self::NAME, "n_splits", v)?;
        }
        if let Some(v) = values.get("mode") {
            param.mode = expect_string(Self::NAME, "mode", v)?;
        }
        if let Some(v) = values.get("role") {
            param.role = expect_string(Self::NAME, "role", v)?;
        }
        if let Some(v) = values.get("shuffle") {
            param.shuffle = expect_bool(Self::NAME, "shuffle", v)?;
        }
        if let Some(v) = values.get("random_seed") {
            param.random_seed = expect_int(Self::NAME, "random_seed", v)?;
        }
        if let Some(v) = values.get("need_cv") {
            param.need_cv = expect_bool(Self::NAME, "need_cv", v)?;
        }
        Ok(param)
    }

    fn check(&self) -> Result<()> {
        if ![HETERO, HOMO].contains(&self.mode.as_str()) {
            return Err(FederatedRecError::invalid_param(
                Self::NAME,
                "mode",
                &self.mode,
                format!("should be one of [{}, {}]", HETERO, HOMO),
            ));
        }
        if ![GUEST, HOST, ARBITER].contains(&self.role.as_str()) {
            return Err(FederatedRecError::invalid_param(
                Self::NAME,
                "role",
                &self.role,
                format!("should be one of [{}, {}, {}]", GUEST, HOST, ARBITER),
            ));
        }
        if self.need_cv && self.n_splits < 2 {
            return Err(FederatedRecError::invalid_param(
                Self::NAME,
                "n_splits",
                self.n_splits,
                "should be at least 2 when need_cv is set",
            ));
        }
        Ok(())
    }
}

/// How often validation runs during training, in iterations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidationFreqs {
    /// Validate every `n` iterations.
    Every(i64),
    /// Validate at the listed iterations.
    At(Vec<i64>),
}

impl ValidationFreqs {
    const FIELD: &'static str = "validation_freqs";

    /// Parses an optional validation frequency: `None`, an integer or a list
    /// of integers.
    pub fn from_value(owner: &str, value: &ParamValue) -> Result<Option<Self>> {
        match value {
            ParamValue::None => Ok(None),
            ParamValue::Int(n) => Ok(Some(ValidationFreqs::Every(*n))),
            ParamValue::List(items) => items
                .iter()
                .map(|item| expect_int(owner, Self::FIELD, item))
                .collect::<Result<Vec<_>>>()
                .map(|at| Some(ValidationFreqs::At(at))),
            other => Err(FederatedRecError::InvalidType {
                field: Self::FIELD.to_string(),
                type_name: other.type_name().to_string(),
            }),
        }
    }

    pub fn check(&self, owner: &str) -> Result<()> {
        let bad = |value: String| {
            FederatedRecError::invalid_param(
                owner,
                Self::FIELD,
                value,
                "should be a positive integer or a non-empty list of positive integers",
            )
        };
        match self {
            ValidationFreqs::Every(n) if *n < 1 => Err(bad(n.to_string())),
            ValidationFreqs::At(at) if at.is_empty() || at.iter().any(|n| *n < 1) => {
                Err(bad(format!("{:?}", at)))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param_map;

    #[test]
    fn test_cv_defaults_pass() {
        CrossValidationParam::default().check().unwrap();
    }

    #[test]
    fn test_cv_checks() {
        let p = CrossValidationParam {
            mode: "vertical".to_string(),
            ..Default::default()
        };
        let err = p.check().unwrap_err();
        assert_eq!(err.field(), Some("mode"));

        let p = CrossValidationParam {
            role: "observer".to_string(),
            ..Default::default()
        };
        assert_eq!(p.check().unwrap_err().field(), Some("role"));

        let p = CrossValidationParam {
            n_splits: 1,
            need_cv: true,
            ..Default::default()
        };
        assert_eq!(p.check().unwrap_err().field(), Some("n_splits"));

        let p = CrossValidationParam {
            n_splits: 1,
            ..Default::default()
        };
        p.check().expect("n_splits is ignored without need_cv");
    }

    #[test]
    fn test_cv_from_values() {
        let p = CrossValidationParam::from_value(&param_map! {
            "n_splits" => 3,
            "need_cv" => true,
            "mode" => "homo",
        })
        .unwrap();
        assert_eq!(p.n_splits, 3);
        assert!(p.need_cv);
        assert_eq!(p.mode, "homo");
        assert!(p.shuffle);
    }

    #[test]
    fn test_validation_freqs() {
        let owner = "matrix_factorization";
        assert_eq!(ValidationFreqs::from_value(owner, &ParamValue::None).unwrap(), None);

        let f = ValidationFreqs::from_value(owner, &ParamValue::Int(5))
            .unwrap()
            .unwrap();
        assert_eq!(f, ValidationFreqs::Every(5));
        f.check(owner).unwrap();

        let f = ValidationFreqs::from_value(owner, &ParamValue::from(vec![10i64, 20]))
            .unwrap()
            .unwrap();
        f.check(owner).unwrap();

        ValidationFreqs::Every(0)
            .check(owner)
            .expect_err("zero frequency should fail check");
        ValidationFreqs::At(vec![])
            .check(owner)
            .expect_err("empty list should fail check");
        ValidationFreqs::At(vec![3, -1])
            .check(owner)
            .expect_err("negative iteration should fail check");

        ValidationFreqs::from_value(owner, &"5".into()).expect_err("string should be rejected");
        ValidationFreqs::from_value(owner, &ParamValue::from(vec![1.5]))
            .expect_err("float entries should be rejected");
    }
}
