use antelope_core::types::{
    AccountInfo, BlockId, BlockInfo, ChainInfo, CodeInfo, PackedTransaction, ProducerList,
    ProducerSchedule, PublicKey, RowPage, TableQuery, Transaction, TransactionReceipt,
};
use antelope_providers::{ApiError, Transport, TransportError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{collections::VecDeque, sync::Mutex};
use thiserror::Error;

mod gateway;

/// Error of the [`StubTransport`]
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StubError {
    #[error("connection refused")]
    Refused,
    #[error("node error: {0}")]
    Api(ApiError),
    #[error("no scripted response")]
    Exhausted,
    #[error("bad scripted response: {0}")]
    Decode(String),
}

impl TransportError for StubError {
    fn as_error_response(&self) -> Option<&ApiError> {
        match self {
            StubError::Api(err) => Some(err),
            _ => None,
        }
    }

    fn as_serde_error(&self) -> Option<&serde_json::Error> {
        None
    }

    fn is_network(&self) -> bool {
        matches!(self, StubError::Refused)
    }
}

/// A transport answering from a script and counting calls per endpoint
#[derive(Debug, Default)]
pub struct StubTransport {
    script: Mutex<VecDeque<Result<Value, StubError>>>,
    calls: Mutex<Vec<&'static str>>,
}

impl StubTransport {
    pub fn respond(&self, value: Value) -> &Self {
        self.script.lock().unwrap().push_back(Ok(value));
        self
    }

    pub fn fail(&self, err: StubError) -> &Self {
        self.script.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn next<R: DeserializeOwned>(&self, endpoint: &'static str) -> Result<R, StubError> {
        self.calls.lock().unwrap().push(endpoint);
        let value = self.script.lock().unwrap().pop_front().ok_or(StubError::Exhausted)??;
        serde_json::from_value(value).map_err(|e| StubError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Transport for StubTransport {
    type Error = StubError;

    async fn get_info(&self) -> Result<ChainInfo, StubError> {
        self.next("get_info")
    }

    async fn get_account(&self, _name: &str) -> Result<AccountInfo, StubError> {
        self.next("get_account")
    }

    async fn get_code(&self, _name: &str) -> Result<CodeInfo, StubError> {
        self.next("get_code")
    }

    async fn get_currency_balance(
        &self,
        _code: &str,
        _account: &str,
        _symbol: Option<&str>,
    ) -> Result<Vec<String>, StubError> {
        self.next("get_currency_balance")
    }

    async fn get_producer_schedule(&self) -> Result<ProducerSchedule, StubError> {
        self.next("get_producer_schedule")
    }

    async fn get_producers(
        &self,
        _json: bool,
        _lower_bound: &str,
        _limit: u32,
    ) -> Result<ProducerList, StubError> {
        self.next("get_producers")
    }

    async fn get_table_rows(&self, _query: &TableQuery) -> Result<RowPage, StubError> {
        self.next("get_table_rows")
    }

    async fn get_block(&self, _block: BlockId) -> Result<BlockInfo, StubError> {
        self.next("get_block")
    }

    async fn get_required_keys(
        &self,
        _tx: &Transaction,
        _available_keys: &[PublicKey],
    ) -> Result<Vec<PublicKey>, StubError> {
        self.next("get_required_keys")
    }

    async fn push_transaction(
        &self,
        _tx: &PackedTransaction,
    ) -> Result<TransactionReceipt, StubError> {
        self.next("push_transaction")
    }
}
