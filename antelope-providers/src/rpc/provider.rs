use crate::{errors::ProviderError, Http as HttpProvider, MockRpc, RpcClient, Transport};

use antelope_core::types::{
    AccountInfo, BlockId, BlockInfo, ChainInfo, CodeInfo, PackedTransaction, ProducerList,
    ProducerSchedule, PublicKey, RowPage, TableQuery, Transaction, TransactionReceipt,
};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{convert::TryFrom, fmt::Debug};
use tracing::trace;
use tracing_futures::Instrument;
use url::{ParseError, Url};

/// An abstract provider for interacting with the chain API of an Antelope node. Must be
/// instantiated with a data transport which implements the
/// [`RpcClient`](trait@crate::RpcClient) trait (e.g. [HTTP](crate::Http)).
///
/// # Example
///
/// ```no_run
/// # async fn foo() -> Result<(), Box<dyn std::error::Error>> {
/// use antelope_providers::{Http, Provider, Transport};
/// use std::convert::TryFrom;
///
/// let provider = Provider::<Http>::try_from("http://127.0.0.1:8888")
///     .expect("could not instantiate HTTP Provider");
///
/// let account = provider.get_account("eosio").await?;
/// println!("Got account: {}", serde_json::to_string(&account)?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Provider<P> {
    inner: P,
}

impl<P> AsRef<P> for Provider<P> {
    fn as_ref(&self) -> &P {
        &self.inner
    }
}

// Request bodies
#[derive(Debug, Serialize)]
struct AccountParams<'a> {
    account_name: &'a str,
}

#[derive(Debug, Serialize)]
struct CodeParams<'a> {
    account_name: &'a str,
    code_as_wasm: bool,
}

#[derive(Debug, Serialize)]
struct CurrencyBalanceParams<'a> {
    code: &'a str,
    account: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    symbol: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ProducersParams<'a> {
    json: bool,
    lower_bound: &'a str,
    limit: u32,
}

#[derive(Debug, Serialize)]
struct BlockParams {
    block_num_or_id: BlockId,
}

#[derive(Debug, Serialize)]
struct RequiredKeysParams<'a> {
    transaction: &'a Transaction,
    available_keys: &'a [PublicKey],
}

#[derive(Debug, Serialize, Deserialize)]
struct RequiredKeys {
    required_keys: Vec<PublicKey>,
}

impl<P: RpcClient> Provider<P> {
    /// Instantiate a new provider with a backend.
    pub fn new(provider: P) -> Self {
        Self { inner: provider }
    }

    /// Make a request to a chain API endpoint via the internal connection, and return the
    /// result.
    pub async fn request<T, R>(&self, endpoint: &str, params: T) -> Result<R, ProviderError>
    where
        T: Debug + Serialize + Send + Sync,
        R: Serialize + DeserializeOwned + Debug + Send,
    {
        let span = tracing::trace_span!(
            "rpc",
            endpoint = endpoint,
            params = ?serde_json::to_string(&params)?
        );
        // https://docs.rs/tracing/0.1.22/tracing/span/struct.Span.html#in-asynchronous-code
        let res = async move {
            trace!("tx");
            let res: R = self.inner.request(endpoint, params).await.map_err(Into::into)?;
            trace!(rx = ?serde_json::to_string(&res)?);
            Ok::<_, ProviderError>(res)
        }
        .instrument(span)
        .await?;
        Ok(res)
    }
}

#[async_trait]
impl<P: RpcClient> Transport for Provider<P> {
    type Error = ProviderError;

    async fn get_info(&self) -> Result<ChainInfo, ProviderError> {
        self.request("get_info", ()).await
    }

    async fn get_account(&self, name: &str) -> Result<AccountInfo, ProviderError> {
        self.request("get_account", AccountParams { account_name: name }).await
    }

    async fn get_code(&self, name: &str) -> Result<CodeInfo, ProviderError> {
        self.request("get_code", CodeParams { account_name: name, code_as_wasm: true }).await
    }

    async fn get_currency_balance(
        &self,
        code: &str,
        account: &str,
        symbol: Option<&str>,
    ) -> Result<Vec<String>, ProviderError> {
        self.request("get_currency_balance", CurrencyBalanceParams { code, account, symbol }).await
    }

    async fn get_producer_schedule(&self) -> Result<ProducerSchedule, ProviderError> {
        self.request("get_producer_schedule", ()).await
    }

    async fn get_producers(
        &self,
        json: bool,
        lower_bound: &str,
        limit: u32,
    ) -> Result<ProducerList, ProviderError> {
        self.request("get_producers", ProducersParams { json, lower_bound, limit }).await
    }

    async fn get_table_rows(&self, query: &TableQuery) -> Result<RowPage, ProviderError> {
        self.request("get_table_rows", query).await
    }

    async fn get_block(&self, block: BlockId) -> Result<BlockInfo, ProviderError> {
        self.request("get_block", BlockParams { block_num_or_id: block }).await
    }

    async fn get_required_keys(
        &self,
        tx: &Transaction,
        available_keys: &[PublicKey],
    ) -> Result<Vec<PublicKey>, ProviderError> {
        let res: RequiredKeys = self
            .request("get_required_keys", RequiredKeysParams { transaction: tx, available_keys })
            .await?;
        Ok(res.required_keys)
    }

    async fn push_transaction(
        &self,
        tx: &PackedTransaction,
    ) -> Result<TransactionReceipt, ProviderError> {
        self.request("push_transaction", tx).await
    }
}

impl Provider<MockRpc> {
    /// Returns a `Provider` instantiated with an internal "mock" transport.
    ///
    /// # Example
    ///
    /// ```
    /// # async fn foo() -> Result<(), Box<dyn std::error::Error>> {
    /// use antelope_providers::{Provider, Transport};
    /// // Instantiate the provider
    /// let (provider, mock) = Provider::mocked();
    /// // Push the mock response
    /// mock.push::<Vec<String>, _>(vec!["10.0000 EOS".to_owned()])?;
    /// // Make the call
    /// let balance = provider.get_currency_balance("eosio.token", "alice", None).await?;
    /// // The response matches
    /// assert_eq!(balance, vec!["10.0000 EOS"]);
    /// // and the request as well!
    /// mock.assert_request(
    ///     "get_currency_balance",
    ///     serde_json::json!({"code": "eosio.token", "account": "alice"}),
    /// )?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn mocked() -> (Self, MockRpc) {
        let mock = MockRpc::new();
        let mock_clone = mock.clone();
        (Self::new(mock), mock_clone)
    }
}

impl TryFrom<&str> for Provider<HttpProvider> {
    type Error = ParseError;

    fn try_from(src: &str) -> Result<Self, Self::Error> {
        Ok(Provider::new(HttpProvider::new(Url::parse(src)?)))
    }
}

impl TryFrom<String> for Provider<HttpProvider> {
    type Error = ParseError;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        Provider::try_from(src.as_str())
    }
}
