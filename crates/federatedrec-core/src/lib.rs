//! Matrix-factorization parameters for federated recommendation.
//!
//! This crate holds the hyperparameters of a federated matrix-factorization
//! model, validates them and converts them to and from the persisted
//! model-meta record. It includes:
//!
//! - **Loosely-typed input**: [`ParamValue`] trees as read from JSON configs.
//! - **Normalization**: string-or-mapping early stop, optimizer and metrics
//!   specs turned into canonical records.
//! - **Validation**: `check` returns a new validated config or an error and
//!   never mutates the input.
//! - **Model meta**: [`ModelMeta`] maps validated hetero configs onto the
//!   `HeteroMFParam` protobuf record.
//!
//! # Example
//!
//! ```
//! use federatedrec_core::params::{BaseParam, HeteroMatrixParam};
//! use federatedrec_core::{param_map, ModelMeta};
//!
//! let values = param_map! {
//!     "optimizer" => param_map! { "optimizer" => "sgd", "learning_rate" => 0.01 },
//!     "batch_size" => 64,
//!     "metrics" => "rmse",
//! };
//! let config = HeteroMatrixParam::from_value(&values).unwrap().check().unwrap();
//! assert_eq!(config.base().metrics(), ["rmse"]);
//!
//! let pb = config.generate_pb().unwrap();
//! assert_eq!(pb.batch_size, 64);
//! ```
//!
//! # Modules
//!
//! - [`value`]: Loosely-typed parameter values.
//! - [`params`]: Parameter objects, normalizers and validation.
//! - [`model_meta`]: Protobuf model-meta conversion.
//! - [`config`]: Loading parameter files.
//! - [`error`]: Error types for the library.

pub mod config;
pub mod consts;
pub mod error;
pub mod model_meta;
pub mod params;
pub mod value;

// Re-export commonly used types at the crate root for convenience
pub use error::{FederatedRecError, Result};
pub use model_meta::ModelMeta;
pub use params::{
    BaseParam, EarlyStop, HeteroMatrixConfig, HeteroMatrixParam, MatrixFactorizationConfig,
    MatrixFactorizationParam, MtxFInitParam, Optimizer,
};
pub use value::ParamValue;
