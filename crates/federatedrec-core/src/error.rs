//! Error types for the federatedrec core library.
//!
//! Every failure in this crate is a synchronous input error. Messages name the
//! offending field, the value that was supplied and the constraint it broke, so
//! they can be surfaced to the user verbatim before any training starts.

use thiserror::Error;

/// The main error type for federatedrec-core operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FederatedRecError {
    /// A parameter holds a value that violates its constraint.
    #[error("{owner}'s {field} {value} not supported, {expected}")]
    InvalidParam {
        /// Parameter object the field belongs to, e.g. `matrix_factorization`.
        owner: String,
        /// Name of the offending field.
        field: String,
        /// The rejected value, rendered for display.
        value: String,
        /// The constraint the value must satisfy.
        expected: String,
    },

    /// A loosely-typed input has a shape the field cannot accept.
    #[error("invalid type for {field}: {type_name}")]
    InvalidType {
        /// Name of the field being normalized.
        field: String,
        /// Name of the type that was supplied.
        type_name: String,
    },

    /// A mapping input is missing its identifying entry.
    #[error("{field} config: {value} invalid")]
    InvalidSpec {
        /// Name of the field being normalized.
        field: String,
        /// The rejected mapping, rendered for display.
        value: String,
    },

    /// A parameter file or mapping names a parameter that does not exist.
    #[error("{owner} has no parameter {name}{suggestion}")]
    UnknownParam {
        /// Parameter object being populated.
        owner: String,
        /// The unknown key.
        name: String,
        /// Either empty or ` (did you mean: [...])`.
        suggestion: String,
    },

    /// Error while loading or parsing a configuration source.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// A description of the configuration error.
        message: String,
    },

    /// Error when model metadata cannot be encoded or decoded.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// A description of the serialization error.
        message: String,
    },
}

impl FederatedRecError {
    pub(crate) fn invalid_param(
        owner: &str,
        field: &str,
        value: impl ToString,
        expected: impl Into<String>,
    ) -> Self {
        FederatedRecError::InvalidParam {
            owner: owner.to_string(),
            field: field.to_string(),
            value: value.to_string(),
            expected: expected.into(),
        }
    }

    /// Returns the field the error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            FederatedRecError::InvalidParam { field, .. }
            | FederatedRecError::InvalidType { field, .. }
            | FederatedRecError::InvalidSpec { field, .. } => Some(field),
            FederatedRecError::UnknownParam { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// A specialized Result type for federatedrec-core operations.
pub type Result<T> = std::result::Result<T, FederatedRecError>;
