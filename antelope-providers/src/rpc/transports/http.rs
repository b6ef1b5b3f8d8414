use super::common::ApiError;
use crate::{
    errors::{is_network_reqwest, ProviderError},
    RpcClient,
};
use async_trait::async_trait;
use reqwest::{header::HeaderValue, Client, Error as ReqwestError};
use serde::{de::DeserializeOwned, Serialize};
use std::{fmt::Debug, str::FromStr, time::Duration};
use thiserror::Error;
use url::Url;

/// Path prefix of the chain API
const CHAIN_API: &str = "v1/chain";

/// A low-level client for a node's chain API over HTTP.
///
/// Every request is a `POST` of the JSON encoded parameters to `{url}/v1/chain/{endpoint}`.
/// A local node serves the API at [`DEFAULT_NODE_URL`](antelope_core::utils::DEFAULT_NODE_URL).
///
/// # Example
///
/// ```no_run
/// use antelope_core::types::ChainInfo;
/// use antelope_providers::{Http, RpcClient};
/// use std::str::FromStr;
///
/// # async fn foo() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = Http::from_str("http://127.0.0.1:8888")?;
/// let info: ChainInfo = provider.request("get_info", ()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Provider {
    client: Client,
    url: Url,
}

#[derive(Error, Debug)]
/// Error thrown when sending an HTTP request
pub enum ClientError {
    /// Thrown if the request failed
    #[error(transparent)]
    ReqwestError(#[from] ReqwestError),

    /// Thrown if the node answered with an error body
    #[error(transparent)]
    ApiError(#[from] ApiError),

    #[error("Deserialization Error: {err}. Response: {text}")]
    /// Serde JSON Error
    SerdeJson {
        /// Underlying error
        err: serde_json::Error,
        /// The contents of the HTTP response that could not be deserialized
        text: String,
    },
}

impl From<ClientError> for ProviderError {
    fn from(src: ClientError) -> Self {
        ProviderError::RpcClientError(Box::new(src))
    }
}

impl crate::TransportError for ClientError {
    fn as_error_response(&self) -> Option<&ApiError> {
        if let ClientError::ApiError(err) = self {
            Some(err)
        } else {
            None
        }
    }

    fn as_serde_error(&self) -> Option<&serde_json::Error> {
        match self {
            ClientError::SerdeJson { err, .. } => Some(err),
            _ => None,
        }
    }

    fn is_network(&self) -> bool {
        match self {
            ClientError::ReqwestError(err) => is_network_reqwest(err),
            _ => false,
        }
    }
}

#[async_trait]
impl RpcClient for Provider {
    type Error = ClientError;

    async fn request<T, R>(&self, endpoint: &str, params: T) -> Result<R, ClientError>
    where
        T: Debug + Serialize + Send + Sync,
        R: Serialize + DeserializeOwned,
    {
        let mut req = self.client.post(self.endpoint_url(endpoint));
        // zero sized parameters stand for "no parameters"
        if std::mem::size_of::<T>() != 0 {
            req = req.json(&params);
        }

        let res = req.send().await?;
        let status = res.status();
        let body = res.bytes().await?;

        if !status.is_success() {
            let err = serde_json::from_slice::<ApiError>(&body).unwrap_or_else(|_| {
                ApiError::from_status(status.as_u16(), String::from_utf8_lossy(&body))
            });
            return Err(err.into())
        }

        serde_json::from_slice(&body).map_err(|err| ClientError::SerdeJson {
            err,
            text: String::from_utf8_lossy(&body).to_string(),
        })
    }
}

impl Provider {
    /// Initializes a new HTTP Client
    ///
    /// # Example
    ///
    /// ```
    /// use antelope_providers::Http;
    /// use url::Url;
    ///
    /// let url = Url::parse("http://127.0.0.1:8888").unwrap();
    /// let provider = Http::new(url);
    /// ```
    pub fn new(url: impl Into<Url>) -> Self {
        Self::new_with_client(url, Client::new())
    }

    /// Initializes a new HTTP Client whose requests fail with a timeout error after `timeout`
    pub fn with_timeout(url: impl Into<Url>, timeout: Duration) -> Result<Self, HttpBuildError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::new_with_client(url, client))
    }

    /// Initializes a new HTTP Client sending `value` as the `Authorization` header
    pub fn new_with_auth(url: impl Into<Url>, value: &str) -> Result<Self, HttpBuildError> {
        let mut auth_value = HeaderValue::from_str(value)?;
        auth_value.set_sensitive(true);

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(reqwest::header::AUTHORIZATION, auth_value);

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self::new_with_client(url, client))
    }

    /// Allows to customize the provider by providing your own http client
    ///
    /// # Example
    ///
    /// ```
    /// use antelope_providers::Http;
    /// use url::Url;
    ///
    /// let url = Url::parse("http://127.0.0.1:8888").unwrap();
    /// let client = reqwest::Client::builder().build().unwrap();
    /// let provider = Http::new_with_client(url, client);
    /// ```
    pub fn new_with_client(url: impl Into<Url>, client: reqwest::Client) -> Self {
        Self { client, url: url.into() }
    }

    /// The Url of the node
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Mutable access to the Url of the node
    pub fn url_mut(&mut self) -> &mut Url {
        &mut self.url
    }

    /// The full Url an endpoint is served at
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{CHAIN_API}/{endpoint}", self.url.as_str().trim_end_matches('/'))
    }
}

impl FromStr for Provider {
    type Err = url::ParseError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let url = Url::parse(src)?;
        Ok(Provider::new(url))
    }
}

#[derive(Error, Debug)]
/// Error thrown when dealing with Http clients
pub enum HttpBuildError {
    /// Thrown if unable to build headers for client
    #[error(transparent)]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),

    /// Thrown if unable to build client
    #[error(transparent)]
    ClientBuild(#[from] reqwest::Error),
}
