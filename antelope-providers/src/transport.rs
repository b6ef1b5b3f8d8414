use crate::TransportError;
use antelope_core::types::{
    AccountInfo, BlockId, BlockInfo, ChainInfo, CodeInfo, PackedTransaction, ProducerList,
    ProducerSchedule, PublicKey, RowPage, TableQuery, Transaction, TransactionReceipt,
};
use async_trait::async_trait;
use auto_impl::auto_impl;
use std::fmt::Debug;

/// The typed chain API operations the gateways are built on.
///
/// [`Provider`](crate::Provider) implements it over any [`RpcClient`](crate::RpcClient). Tests
/// and alternative backends implement it directly; the gateways only ever see this trait.
///
/// Names are passed through as given, validating them is left to the node.
#[async_trait]
#[auto_impl(&, Box, Arc)]
pub trait Transport: Debug + Send + Sync {
    /// Error type returned by all operations
    type Error: TransportError + 'static;

    /// Returns general information about the chain and its head block
    async fn get_info(&self) -> Result<ChainInfo, Self::Error>;

    async fn get_account(&self, name: &str) -> Result<AccountInfo, Self::Error>;

    /// Returns the account's contract code as wasm
    async fn get_code(&self, name: &str) -> Result<CodeInfo, Self::Error>;

    /// Returns the balances `account` holds in the token contract `code`, each formatted as an
    /// asset string. `symbol` restricts the result to a single token.
    async fn get_currency_balance(
        &self,
        code: &str,
        account: &str,
        symbol: Option<&str>,
    ) -> Result<Vec<String>, Self::Error>;

    async fn get_producer_schedule(&self) -> Result<ProducerSchedule, Self::Error>;

    async fn get_producers(
        &self,
        json: bool,
        lower_bound: &str,
        limit: u32,
    ) -> Result<ProducerList, Self::Error>;

    async fn get_table_rows(&self, query: &TableQuery) -> Result<RowPage, Self::Error>;

    async fn get_block(&self, block: BlockId) -> Result<BlockInfo, Self::Error>;

    /// Returns the subset of `available_keys` needed to authorize `tx`
    async fn get_required_keys(
        &self,
        tx: &Transaction,
        available_keys: &[PublicKey],
    ) -> Result<Vec<PublicKey>, Self::Error>;

    /// Submits a signed transaction and waits for its execution trace
    async fn push_transaction(
        &self,
        tx: &PackedTransaction,
    ) -> Result<TransactionReceipt, Self::Error>;
}
