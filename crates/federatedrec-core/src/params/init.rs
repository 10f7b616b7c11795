//! Embedding initialization parameters.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{expect_bool, expect_int, expect_number, expect_string, reject_unknown, BaseParam};
use crate::consts::DEFAULT_EMBED_DIM;
use crate::error::{FederatedRecError, Result};
use crate::value::ParamValue;

/// How latent factor vectors are initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitMethod {
    RandomUniform,
    #[default]
    RandomNormal,
    Ones,
    Zeros,
    Const,
}

impl InitMethod {
    const ALL: [InitMethod; 5] = [
        InitMethod::RandomUniform,
        InitMethod::RandomNormal,
        InitMethod::Ones,
        InitMethod::Zeros,
        InitMethod::Const,
    ];

    /// Parses an init method key (e.g. `"random_normal"`).
    pub fn parse(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_key() == s)
            .ok_or_else(|| {
                let keys: Vec<_> = Self::ALL.iter().map(|m| m.as_key()).collect();
                FederatedRecError::invalid_param(
                    MtxFInitParam::NAME,
                    "init_method",
                    s,
                    format!("should be one of [{}]", keys.join(", ")),
                )
            })
    }

    /// Returns the canonical key.
    pub fn as_key(&self) -> &'static str {
        match self {
            InitMethod::RandomUniform => "random_uniform",
            InitMethod::RandomNormal => "random_normal",
            InitMethod::Ones => "ones",
            InitMethod::Zeros => "zeros",
            InitMethod::Const => "const",
        }
    }
}

impl fmt::Display for InitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// Matrix-factorization initialization parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MtxFInitParam {
    /// Size of the latent factor vectors.
    pub embed_dim: i64,
    pub init_method: InitMethod,
    /// Fill value used by [`InitMethod::Const`].
    pub init_const: f64,
    pub fit_intercept: bool,
}

impl Default for MtxFInitParam {
    fn default() -> Self {
        Self {
            embed_dim: DEFAULT_EMBED_DIM,
            init_method: InitMethod::default(),
            init_const: 1.0,
            fit_intercept: true,
        }
    }
}

impl MtxFInitParam {
    /// Creates init parameters with the given embedding dimension and defaults
    /// for everything else.
    pub fn new(embed_dim: i64) -> Self {
        Self {
            embed_dim,
            ..Self::default()
        }
    }

    /// Returns a copy with a different embedding dimension.
    pub fn with_embed_dim(&self, embed_dim: i64) -> Self {
        Self {
            embed_dim,
            ..self.clone()
        }
    }

    /// Returns a copy with a different initialization method.
    pub fn with_init_method(&self, init_method: InitMethod) -> Self {
        Self {
            init_method,
            ..self.clone()
        }
    }

    pub fn with_init_const(&self, init_const: f64) -> Self {
        Self {
            init_const,
            ..self.clone()
        }
    }
}

impl BaseParam for MtxFInitParam {
    type Checked = ();

    const NAME: &'static str = "init_param";

    fn from_values(values: &BTreeMap<String, ParamValue>) -> Result<Self> {
        reject_unknown(
            Self::NAME,
            values,
            &["embed_dim", "init_method", "init_const", "fit_intercept"],
        )?;
        let mut param = Self::default();
        if let Some(v) = values.get("embed_dim") {
            param.embed_dim = expect_int(Self::NAME, "embed_dim", v)?;
        }
        if let Some(v) = values.get("init_method") {
            param.init_method = InitMethod::parse(&expect_string(Self::NAME, "init_method", v)?)?;
        }
        if let Some(v) = values.get("init_const") {
            param.init_const = expect_number(Self::NAME, "init_const", v)?;
        }
        if let Some(v) = values.get("fit_intercept") {
            param.fit_intercept = expect_bool(Self::NAME, "fit_intercept", v)?;
        }
        Ok(param)
    }

    fn check(&self) -> Result<()> {
        if self.embed_dim < 1 {
            return Err(FederatedRecError::invalid_param(
                Self::NAME,
                "embed_dim",
                self.embed_dim,
                "should be a positive integer",
            ));
        }
        if !self.init_const.is_finite() {
            return Err(FederatedRecError::invalid_param(
                Self::NAME,
                "init_const",
                self.init_const,
                "should be a finite number",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param_map;

    #[test]
    fn test_defaults() {
        let p = MtxFInitParam::default();
        assert_eq!(p.embed_dim, 10);
        assert_eq!(p.init_method, InitMethod::RandomNormal);
        assert!(p.fit_intercept);
        p.check().expect("default init param should pass check");
    }

    #[test]
    fn test_embed_dim_must_be_positive() {
        MtxFInitParam::new(1).check().unwrap();
        let err = MtxFInitParam::new(0).check().unwrap_err();
        assert_eq!(
            err.to_string(),
            "init_param's embed_dim 0 not supported, should be a positive integer"
        );
        MtxFInitParam::new(-4)
            .check()
            .expect_err("negative embed_dim should fail check");
    }

    #[test]
    fn test_init_const_must_be_finite() {
        let p = MtxFInitParam::default().with_init_const(f64::NAN);
        p.check().expect_err("NaN init_const should fail check");
    }

    #[test]
    fn test_copy_overrides_leave_original() {
        let base = MtxFInitParam::default();
        let wide = base.with_embed_dim(64).with_init_method(InitMethod::Zeros);
        assert_eq!(base.embed_dim, 10);
        assert_eq!(wide.embed_dim, 64);
        assert_eq!(wide.init_method, InitMethod::Zeros);
    }

    #[test]
    fn test_parse_init_method_keys() {
        for m in InitMethod::ALL {
            assert_eq!(InitMethod::parse(m.as_key()).unwrap(), m);
        }
        let err = InitMethod::parse("xavier").unwrap_err();
        assert_eq!(
            err.to_string(),
            "init_param's init_method xavier not supported, should be one of \
             [random_uniform, random_normal, ones, zeros, const]"
        );
    }

    #[test]
    fn test_from_values() {
        let v = param_map! { "embed_dim" => 32, "init_method" => "random_uniform" };
        let p = MtxFInitParam::from_value(&v).unwrap();
        assert_eq!(p.embed_dim, 32);
        assert_eq!(p.init_method, InitMethod::RandomUniform);
        assert_eq!(p.init_const, 1.0);

        let v = param_map! { "embed_dim" => 3.5 };
        MtxFInitParam::from_value(&v).expect_err("non-integral embed_dim should be rejected");

        let v = param_map! { "embed" => 3 };
        MtxFInitParam::from_value(&v).expect_err("unknown key should be rejected");

        MtxFInitParam::from_value(&ParamValue::Int(3)).expect_err("non-mapping should be rejected");
    }
}
