use std::{error::Error, fmt::Debug};
use thiserror::Error;

use crate::ApiError;

/// A `TransportError` is an abstraction over error types returned by a
/// [`crate::RpcClient`] or a [`crate::Transport`].
///
/// All clients can return [`ApiError`] responses, as well as serde deserialization errors, and
/// all of them can fail to reach the node. Because client errors are typically type-erased via
/// the [`ProviderError`], the error info can be difficult to access. This trait provides
/// convenient access to the underlying error types, which is what lets the gateways classify
/// failures of any transport.
pub trait TransportError: Error + Debug + Send + Sync {
    /// Access an underlying node error response (if any)
    fn as_error_response(&self) -> Option<&ApiError>;

    /// Returns `true` if the underlying error is a node error response
    fn is_error_response(&self) -> bool {
        self.as_error_response().is_some()
    }

    /// Access an underlying `serde_json` error (if any)
    fn as_serde_error(&self) -> Option<&serde_json::Error>;

    /// Returns `true` if the underlying error is a serde_json (de)serialization
    /// error
    fn is_serde_error(&self) -> bool {
        self.as_serde_error().is_some()
    }

    /// Returns `true` if the node could not be reached: connection failures, timeouts and
    /// failures to send the request or read the response
    fn is_network(&self) -> bool;
}

/// Whether a reqwest error happened on the way to or from the node
pub(crate) fn is_network_reqwest(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout() || err.is_request() || err.is_body()
}

#[derive(Debug, Error)]
/// An error thrown when making a call to the provider
pub enum ProviderError {
    /// An internal error in the RPC client
    #[error("{0}")]
    RpcClientError(Box<dyn TransportError + Send + Sync>),

    /// Error in underlying lib `serde_json`
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    /// Error in underlying lib `reqwest`
    #[error(transparent)]
    HTTPError(#[from] reqwest::Error),

    /// Custom error from unknown source
    #[error("custom error: {0}")]
    CustomError(String),
}

impl TransportError for ProviderError {
    fn as_error_response(&self) -> Option<&ApiError> {
        if let ProviderError::RpcClientError(err) = self {
            err.as_error_response()
        } else {
            None
        }
    }

    fn as_serde_error(&self) -> Option<&serde_json::Error> {
        match self {
            ProviderError::RpcClientError(e) => e.as_serde_error(),
            ProviderError::SerdeJson(e) => Some(e),
            _ => None,
        }
    }

    fn is_network(&self) -> bool {
        match self {
            ProviderError::RpcClientError(e) => e.is_network(),
            ProviderError::HTTPError(e) => is_network_reqwest(e),
            _ => false,
        }
    }
}
