//! Boilerplate error definitions.
use crate::types::PackError;
use thiserror::Error;

/// A type alias for std's Result with the Error as our error type.
pub type Result<T, E = AbiError> = std::result::Result<T, E>;

/// ABI codec related errors
#[derive(Error, Debug)]
pub enum AbiError {
    /// Thrown when the JSON is malformed, does not match the ABI schema or carries an invalid
    /// action or table name
    #[error("invalid ABI JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Thrown when the `version` field does not name a supported ABI version
    #[error("unsupported ABI version `{0}`")]
    UnsupportedVersion(String),

    /// Thrown when the binary encoding can not be decoded
    #[error(transparent)]
    Pack(#[from] PackError),
}
