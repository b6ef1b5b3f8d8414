use super::ApiError;
use crate::{ProviderError, RpcClient};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::{
    borrow::Borrow,
    collections::VecDeque,
    fmt::Debug,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use thiserror::Error;

/// Helper type that can be used to pass through the `params` value.
/// This is necessary because the HTTP client skips the request body if the params are of
/// size 0
#[derive(Clone, Debug)]
enum MockParams {
    Value(Value),
    Zst,
}

/// Helper response type for `MockRpc`, allowing node errors and transport failures to be
/// scripted. `Value` for successful responses.
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Successful response with a `serde_json::Value`.
    Value(Value),

    /// Error response with the node's error body.
    Error(ApiError),

    /// The request timed out
    Timeout,

    /// The connection was reset before a response arrived
    ConnectionReset,
}

#[derive(Clone, Debug)]
/// Mock transport used in test environments.
///
/// Responses are handed out in the order they were pushed and every request is recorded.
pub struct MockRpc {
    requests: Arc<Mutex<VecDeque<(String, MockParams)>>>,
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
}

impl Default for MockRpc {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl RpcClient for MockRpc {
    type Error = MockError;

    /// Pushes the `(endpoint, params)` to the back of the `requests` queue,
    /// pops the responses from the front of the `responses` queue
    async fn request<T, R>(&self, endpoint: &str, params: T) -> Result<R, MockError>
    where
        T: Debug + Serialize + Send + Sync,
        R: Serialize + DeserializeOwned,
    {
        let params = if std::mem::size_of::<T>() == 0 {
            MockParams::Zst
        } else {
            MockParams::Value(serde_json::to_value(params)?)
        };
        lock(&self.requests).push_back((endpoint.to_owned(), params));
        let element = lock(&self.responses).pop_front().ok_or(MockError::EmptyResponses)?;
        match element {
            MockResponse::Value(value) => {
                let res: R = serde_json::from_value(value)?;
                Ok(res)
            }
            MockResponse::Error(error) => Err(MockError::ApiError(error)),
            MockResponse::Timeout => Err(MockError::Timeout),
            MockResponse::ConnectionReset => Err(MockError::ConnectionReset),
        }
    }
}

impl MockRpc {
    /// Instantiates a mock transport
    pub fn new() -> Self {
        Self {
            requests: Arc::new(Mutex::new(VecDeque::new())),
            responses: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Checks that the oldest unchecked request was made to `endpoint` with `data`
    pub fn assert_request<T: Serialize + Send + Sync>(
        &self,
        endpoint: &str,
        data: T,
    ) -> Result<(), MockError> {
        let (e, inp) = lock(&self.requests).pop_front().ok_or(MockError::EmptyRequests)?;
        assert_eq!(e, endpoint);
        if std::mem::size_of::<T>() == 0 {
            assert!(matches!(inp, MockParams::Zst));
        } else if let MockParams::Value(inp) = inp {
            assert_eq!(serde_json::to_value(data)?, inp);
        } else {
            unreachable!("Zero sized types must be denoted with MockParams::Zst")
        }

        Ok(())
    }

    /// The endpoints requested so far and not yet checked with `assert_request`, oldest first
    pub fn requested_endpoints(&self) -> Vec<String> {
        lock(&self.requests).iter().map(|(endpoint, _)| endpoint.clone()).collect()
    }

    /// The parameters of the unchecked requests made to `endpoint`, `None` standing for a
    /// request without parameters
    pub fn requests_to(&self, endpoint: &str) -> Vec<Option<Value>> {
        lock(&self.requests)
            .iter()
            .filter(|(e, _)| e == endpoint)
            .map(|(_, params)| match params {
                MockParams::Value(value) => Some(value.clone()),
                MockParams::Zst => None,
            })
            .collect()
    }

    /// The number of unchecked requests made to `endpoint`
    pub fn request_count(&self, endpoint: &str) -> usize {
        lock(&self.requests).iter().filter(|(e, _)| e == endpoint).count()
    }

    /// The number of responses not yet handed out
    pub fn pending_responses(&self) -> usize {
        lock(&self.responses).len()
    }

    /// Pushes the data to the responses
    pub fn push<T: Serialize + Send + Sync, K: Borrow<T>>(&self, data: K) -> Result<(), MockError> {
        let value = serde_json::to_value(data.borrow())?;
        lock(&self.responses).push_back(MockResponse::Value(value));
        Ok(())
    }

    /// Pushes the data or error to the responses
    pub fn push_response(&self, response: MockResponse) {
        lock(&self.responses).push_back(response);
    }
}

#[derive(Error, Debug)]
/// Errors for the `MockRpc`
pub enum MockError {
    /// (De)Serialization error
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    /// Empty requests array
    #[error("empty requests array, please push some requests")]
    EmptyRequests,

    /// Empty responses array
    #[error("empty responses array, please push some responses")]
    EmptyResponses,

    /// Scripted node error
    #[error("node error: {0}")]
    ApiError(ApiError),

    /// Scripted timeout
    #[error("request timed out")]
    Timeout,

    /// Scripted connection failure
    #[error("connection reset by peer")]
    ConnectionReset,
}

impl crate::TransportError for MockError {
    fn as_error_response(&self) -> Option<&ApiError> {
        match self {
            MockError::ApiError(e) => Some(e),
            _ => None,
        }
    }

    fn as_serde_error(&self) -> Option<&serde_json::Error> {
        match self {
            MockError::SerdeJson(e) => Some(e),
            _ => None,
        }
    }

    fn is_network(&self) -> bool {
        matches!(self, MockError::Timeout | MockError::ConnectionReset)
    }
}

impl From<MockError> for ProviderError {
    fn from(src: MockError) -> Self {
        ProviderError::RpcClientError(Box::new(src))
    }
}
