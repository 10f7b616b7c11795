//! Loading parameter objects from JSON files.
//!
//! A parameter file is a single JSON object whose keys are parameter names:
//!
//! ```json
//! {
//!     "optimizer": {"optimizer": "Adam", "learning_rate": 0.05},
//!     "early_stop": {"early_stop": "abs", "eps": 0.01},
//!     "batch_size": 128,
//!     "init_param": {"embed_dim": 16},
//!     "metrics": ["rmse"]
//! }
//! ```

use std::path::Path;

use tracing::info;

use crate::error::{FederatedRecError, Result};
use crate::params::BaseParam;
use crate::value::ParamValue;

/// Parses a JSON document into a [`ParamValue`].
pub fn parse_values(text: &str) -> Result<ParamValue> {
    serde_json::from_str(text).map_err(|e| FederatedRecError::ConfigError {
        message: format!("invalid JSON: {}", e),
    })
}

/// Builds a parameter object from a JSON document. The result is not checked.
pub fn param_from_str<P: BaseParam>(text: &str) -> Result<P> {
    P::from_value(&parse_values(text)?)
}

/// Reads a parameter object from a JSON file. The result is not checked.
pub fn load_param<P: BaseParam>(path: impl AsRef<Path>) -> Result<P> {
    let path = path.as_ref();
    info!(path = %path.display(), param = P::NAME, "Loading parameter file");
    let text = std::fs::read_to_string(path).map_err(|e| FederatedRecError::ConfigError {
        message: format!("failed to read {}: {}", path.display(), e),
    })?;
    param_from_str(&text).map_err(|e| match e {
        FederatedRecError::ConfigError { message } => FederatedRecError::ConfigError {
            message: format!("{}: {}", path.display(), message),
        },
        other => other,
    })
}

/// Reads and checks a parameter object from a JSON file.
pub fn load_checked<P: BaseParam>(path: impl AsRef<Path>) -> Result<P::Checked> {
    load_param::<P>(path)?.check()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{HeteroMatrixParam, MatrixFactorizationParam};
    use std::io::Write;

    #[test]
    fn test_param_from_str() {
        let p: MatrixFactorizationParam =
            param_from_str(r#"{"batch_size": 64, "optimizer": "Adagrad"}"#).unwrap();
        assert_eq!(p.batch_size, 64);
        assert_eq!(p.check().unwrap().optimizer().optimizer, "Adagrad");
    }

    #[test]
    fn test_non_object_document_fails() {
        let err = param_from_str::<MatrixFactorizationParam>("[1, 2]").unwrap_err();
        assert_eq!(err.to_string(), "invalid type for matrix_factorization: list");

        let err = param_from_str::<MatrixFactorizationParam>("{oops").unwrap_err();
        assert!(matches!(err, FederatedRecError::ConfigError { .. }));
    }

    #[test]
    fn test_load_checked_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"max_iter": 20, "aggregate_iters": 2, "early_stop": {{"early_stop": "abs", "eps": 0.01}}}}"#
        )
        .unwrap();

        let config = load_checked::<HeteroMatrixParam>(file.path()).unwrap();
        assert_eq!(config.base().max_iter(), 20);
        assert_eq!(config.aggregate_iters(), 2);
        assert_eq!(config.base().early_stop().eps, 0.01);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_param::<HeteroMatrixParam>(dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
