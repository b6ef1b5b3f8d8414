//! The uniform failure model every gateway operation reports with.
//!
//! Gateways never panic and never hand a raw transport or signer error to the caller. They
//! classify it into an [`ErrorKind`], attach a human readable message and keep the original
//! error as the [`cause`](FailureInfo::cause).
use crate::{
    abi::AbiError,
    types::{NameError, TableQueryError},
};
use std::{error::Error, fmt};
use thiserror::Error;

/// The result type of all gateway operations
pub type GatewayResult<T> = Result<T, FailureInfo>;

/// Boxed original error kept as the cause of a failure
pub type BoxedCause = Box<dyn Error + Send + Sync + 'static>;

/// Coarse classification of a failure
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The remote could not be reached: connection, timeout or send failures
    Network,
    /// The requested entity does not exist
    NotFound,
    /// The request was rejected as malformed, locally or by the node
    InvalidArgument,
    /// The node refused a transaction
    RemoteRejected,
    /// The signer failed to produce signatures
    SigningFailed,
    /// The caller cancelled the operation
    Cancelled,
    /// Anything not classified above
    Unknown,
}

/// A classified failure
#[derive(Error)]
#[error("{kind}: {message}")]
pub struct FailureInfo {
    pub kind: ErrorKind,
    pub message: String,
    #[source]
    cause: Option<BoxedCause>,
}

impl FailureInfo {
    /// A failure without an underlying error
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), cause: None }
    }

    /// A failure wrapping the original error, moved in unchanged
    pub fn with_cause(
        kind: ErrorKind,
        message: impl Into<String>,
        cause: impl Into<BoxedCause>,
    ) -> Self {
        Self { kind, message: message.into(), cause: Some(cause.into()) }
    }

    /// A failure classified as `kind` whose message is the cause's display form
    pub fn from_error<E: Error + Send + Sync + 'static>(kind: ErrorKind, err: E) -> Self {
        let message = err.to_string();
        Self::with_cause(kind, message, err)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled, "operation cancelled")
    }

    /// Reclassifies the failure, keeping its message and cause
    #[must_use]
    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The original error, if any
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// The original error if it is an `E`
    pub fn downcast_cause<E: Error + 'static>(&self) -> Option<&E> {
        self.cause.as_ref().and_then(|cause| cause.downcast_ref::<E>())
    }

    /// Takes the original error out of the failure
    pub fn into_cause(self) -> Option<BoxedCause> {
        self.cause
    }

    pub fn is_kind(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Debug for FailureInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FailureInfo")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("cause", &self.cause)
            .finish()
    }
}

impl From<AbiError> for FailureInfo {
    fn from(err: AbiError) -> Self {
        Self::from_error(ErrorKind::InvalidArgument, err)
    }
}

impl From<TableQueryError> for FailureInfo {
    fn from(err: TableQueryError) -> Self {
        Self::from_error(ErrorKind::InvalidArgument, err)
    }
}

impl From<NameError> for FailureInfo {
    fn from(err: NameError) -> Self {
        Self::from_error(ErrorKind::InvalidArgument, err)
    }
}
