//! The read-only half of the gateway.
//!
//! [`QueryGateway`] forwards each call to its [`Transport`] and turns the outcome into a
//! [`GatewayResult`]: successful payloads are returned untouched, every failure is classified
//! into a [`FailureInfo`] that keeps the transport's error as its cause.
use crate::{
    utils::{cancellable, check_account_name},
    Transport, TransportError,
};
use antelope_core::{
    failure::{ErrorKind, FailureInfo, GatewayResult},
    types::{
        AccountInfo, Asset, BlockId, BlockInfo, ChainConfig, ChainInfo, Checksum256, CodeInfo,
        ProducerList, ProducerSchedule, RowPage, TableQuery,
    },
};
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// Classifies a transport error.
///
/// - connection, timeout and send failures are [`ErrorKind::Network`], as are 502, 503 and 504
///   answers of a proxy in front of the node
/// - node errors reporting a missing entity are [`ErrorKind::NotFound`]
/// - other client errors and argument validation errors of the node are
///   [`ErrorKind::InvalidArgument`]
/// - anything else is [`ErrorKind::Unknown`]
///
/// Node errors use the node's most specific diagnostic as the message.
pub fn classify<E: TransportError + 'static>(err: E) -> FailureInfo {
    let (kind, message) = if err.is_network() {
        (ErrorKind::Network, err.to_string())
    } else if let Some(api) = err.as_error_response().filter(|api| api.is_gateway_failure()) {
        (ErrorKind::Network, format!("node unavailable behind a gateway (code: {})", api.code))
    } else if let Some(api) = err.as_error_response() {
        let kind = if api.is_not_found() {
            ErrorKind::NotFound
        } else if api.is_invalid_argument() {
            ErrorKind::InvalidArgument
        } else {
            ErrorKind::Unknown
        };
        (kind, api.diagnostic().to_owned())
    } else {
        (ErrorKind::Unknown, err.to_string())
    };
    FailureInfo::with_cause(kind, message, err)
}

/// Normalizes read-only chain API calls into [`GatewayResult`]s.
///
/// The gateway holds no mutable state. It may own its transport or borrow it, since
/// [`Transport`] is implemented for `&T`, `Box<T>` and `Arc<T>`.
///
/// ```no_run
/// use antelope_core::{failure::ErrorKind, types::TableQuery};
/// use antelope_providers::{Http, Provider, QueryGateway};
/// use std::convert::TryFrom;
///
/// # async fn foo() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = Provider::<Http>::try_from("http://127.0.0.1:8888")?;
/// let gateway = QueryGateway::new(&provider);
///
/// match gateway.get_account("nobody").await {
///     Ok(account) => println!("{account:?}"),
///     Err(failure) if failure.kind == ErrorKind::NotFound => println!("no such account"),
///     Err(failure) => return Err(failure.into()),
/// }
///
/// let page = gateway
///     .get_table_rows(&TableQuery::new("eosio.token", "alice", "accounts"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct QueryGateway<T> {
    transport: T,
    config: ChainConfig,
    cancel: Option<CancellationToken>,
}

impl<T: Transport> QueryGateway<T> {
    pub fn new(transport: T) -> Self {
        Self { transport, config: ChainConfig::default(), cancel: None }
    }

    /// Sets the chain configuration used to fill in unspecified accounts and tokens
    #[must_use]
    pub fn with_config(mut self, config: ChainConfig) -> Self {
        self.config = config;
        self
    }

    /// Races every call against `token`. Once it is cancelled, in-flight calls are dropped
    /// and return [`ErrorKind::Cancelled`].
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancel.as_ref()
    }

    /// Awaits a call made on the transport, honoring cancellation and classifying its failure
    /// with [`classify`]
    pub async fn call<R, F>(&self, endpoint: &'static str, fut: F) -> GatewayResult<R>
    where
        F: Future<Output = Result<R, T::Error>>,
    {
        trace!(endpoint, "query");
        let res = match cancellable(self.cancel.as_ref(), fut).await {
            Some(Ok(res)) => return Ok(res),
            Some(Err(err)) => classify(err),
            None => FailureInfo::cancelled(),
        };
        debug!(endpoint, kind = %res.kind, message = %res.message, "query failed");
        Err(res)
    }

    pub async fn get_info(&self) -> GatewayResult<ChainInfo> {
        self.call("get_info", self.transport.get_info()).await
    }

    /// Returns the chain id, the value transactions are signed against
    pub async fn get_chain_id(&self) -> GatewayResult<Checksum256> {
        Ok(self.get_info().await?.chain_id)
    }

    /// Fails with [`ErrorKind::InvalidArgument`] without contacting the node if `name` is
    /// empty or longer than 13 characters
    pub async fn get_account(&self, name: &str) -> GatewayResult<AccountInfo> {
        check_account_name(name).map_err(FailureInfo::invalid_argument)?;
        self.call("get_account", self.transport.get_account(name)).await
    }

    /// Same local checks as [`get_account`](Self::get_account)
    pub async fn get_code(&self, name: &str) -> GatewayResult<CodeInfo> {
        check_account_name(name).map_err(FailureInfo::invalid_argument)?;
        self.call("get_code", self.transport.get_code(name)).await
    }

    pub async fn get_currency_balance(
        &self,
        contract: &str,
        account: &str,
        symbol: Option<&str>,
    ) -> GatewayResult<Vec<String>> {
        self.call(
            "get_currency_balance",
            self.transport.get_currency_balance(contract, account, symbol),
        )
        .await
    }

    /// Returns the balance `account` holds of a single token, `None` if it holds none.
    ///
    /// The token defaults to the configured core token. A balance the node reports in a form
    /// that does not parse is an [`ErrorKind::Unknown`] failure.
    pub async fn get_balance(
        &self,
        account: &str,
        contract: Option<&str>,
        symbol: Option<&str>,
    ) -> GatewayResult<Option<Asset>> {
        let contract = contract
            .map(str::to_owned)
            .unwrap_or_else(|| self.config.main_token_contract.to_string());
        let symbol = symbol.unwrap_or(&self.config.main_token);
        let balances = self.get_currency_balance(&contract, account, Some(symbol)).await?;
        balances
            .first()
            .map(|balance| {
                balance.parse::<Asset>().map_err(|err| {
                    FailureInfo::with_cause(
                        ErrorKind::Unknown,
                        format!("malformed balance `{balance}`"),
                        err,
                    )
                })
            })
            .transpose()
    }

    pub async fn get_producer_schedule(&self) -> GatewayResult<ProducerSchedule> {
        self.call("get_producer_schedule", self.transport.get_producer_schedule()).await
    }

    /// Lists block producers. A `limit` of 0 is rejected locally.
    pub async fn get_producers(
        &self,
        json: bool,
        lower_bound: &str,
        limit: u32,
    ) -> GatewayResult<ProducerList> {
        if limit == 0 {
            return Err(FailureInfo::invalid_argument("limit must be greater than zero"))
        }
        self.call("get_producers", self.transport.get_producers(json, lower_bound, limit)).await
    }

    /// Reads a page of table rows. The query is validated before any call is made.
    pub async fn get_table_rows(&self, query: &TableQuery) -> GatewayResult<RowPage> {
        query.validate()?;
        self.call("get_table_rows", self.transport.get_table_rows(query)).await
    }

    pub async fn get_block(&self, block: impl Into<BlockId>) -> GatewayResult<BlockInfo> {
        self.call("get_block", self.transport.get_block(block.into())).await
    }
}
