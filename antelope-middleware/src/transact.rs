//! The transactional half of the gateway.
//!
//! A [`TransactGateway`] turns a [`TransactionRequest`] into a transaction on chain in one
//! attempt: it references a recent block, asks the node which of the signer's keys are
//! required, has the signer sign and submits the result. Each attempt ends in exactly one
//! terminal [`TxStage`]. Nothing is retried.
use antelope_core::{
    abi::{self, AbiDef},
    failure::{ErrorKind, FailureInfo, GatewayResult},
    types::{
        ChainConfig, Checksum256, Pack, PackedTransaction, Transaction, TransactionReceipt,
        TransactionRequest,
    },
};
use antelope_providers::{classify, utils::cancellable, QueryGateway, Transport, TransportError};
use antelope_signers::Signer;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// The stages of a transaction attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxStage {
    /// Assembled against the chain's current state
    Built,
    /// Handed to the signer
    Signing,
    /// Signed but not submitted. Terminal when broadcasting is disabled.
    Signed,
    /// Handed to the node
    Submitting,
    /// Executed by the node
    Confirmed,
    /// Refused by the node
    Rejected,
    /// The node could not be reached while building or submitting
    NetworkFailed,
    /// The signer failed, nothing was submitted
    SigningFailed,
    /// The caller cancelled the attempt
    Cancelled,
}

impl TxStage {
    /// Whether an attempt ends in this stage
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TxStage::Built | TxStage::Signing | TxStage::Submitting)
    }

    /// The terminal stage an attempt failing with `kind` ends in
    pub fn from_failure(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Network => TxStage::NetworkFailed,
            ErrorKind::SigningFailed => TxStage::SigningFailed,
            ErrorKind::Cancelled => TxStage::Cancelled,
            _ => TxStage::Rejected,
        }
    }
}

/// What a successful attempt produced
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TxOutput {
    /// The node executed the transaction
    Confirmed(TransactionReceipt),
    /// Broadcasting was disabled, the signed transaction is handed back
    Signed(PackedTransaction),
}

impl TxOutput {
    pub fn receipt(&self) -> Option<&TransactionReceipt> {
        match self {
            TxOutput::Confirmed(receipt) => Some(receipt),
            TxOutput::Signed(_) => None,
        }
    }

    pub fn signed(&self) -> Option<&PackedTransaction> {
        match self {
            TxOutput::Signed(tx) => Some(tx),
            TxOutput::Confirmed(_) => None,
        }
    }
}

/// The terminal stage of an attempt together with its result
#[derive(Debug)]
pub struct TransactOutcome<T = TxOutput> {
    pub stage: TxStage,
    pub result: GatewayResult<T>,
}

impl<T> TransactOutcome<T> {
    /// An outcome ending in `stage` on success, or in the stage matching the failure's kind
    pub fn from_result(stage: TxStage, result: GatewayResult<T>) -> Self {
        match result {
            Ok(value) => Self { stage, result: Ok(value) },
            Err(failure) => Self { stage: TxStage::from_failure(failure.kind), result: Err(failure) },
        }
    }

    pub fn into_result(self) -> GatewayResult<T> {
        self.result
    }
}

/// Builds, signs and submits transactions.
///
/// Chain state is read through a [`QueryGateway`] over the same transport, signatures come
/// from the injected [`Signer`].
///
/// ```no_run
/// use antelope_core::types::{system::names, Action, PermissionLevel, TransactionRequest};
/// use antelope_middleware::TransactGateway;
/// use antelope_providers::{Http, Provider};
/// use antelope_signers::LocalWallet;
/// use std::convert::TryFrom;
///
/// # async fn foo() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = Provider::<Http>::try_from("http://127.0.0.1:8888")?;
/// let wallet: LocalWallet = "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3".parse()?;
/// let gateway = TransactGateway::new(provider, wallet);
///
/// let alice = "alice".parse()?;
/// let action = Action::new(
///     "hello".parse()?,
///     "hi".parse()?,
///     vec![PermissionLevel::new(alice, names::ACTIVE)],
///     Vec::<u8>::new(),
/// );
/// let receipt = gateway.send_transaction(&TransactionRequest::new().action(action)).await?;
/// println!("{}", receipt.transaction_id);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct TransactGateway<T, S> {
    pub(crate) query: QueryGateway<T>,
    pub(crate) signer: S,
}

impl<T: Transport, S: Signer> TransactGateway<T, S> {
    pub fn new(transport: T, signer: S) -> Self {
        Self { query: QueryGateway::new(transport), signer }
    }

    /// Creates a gateway reading chain state through an existing query gateway
    pub fn from_query(query: QueryGateway<T>, signer: S) -> Self {
        Self { query, signer }
    }

    #[must_use]
    pub fn with_config(mut self, config: ChainConfig) -> Self {
        self.query = self.query.with_config(config);
        self
    }

    /// Races every transport and signer call against `token`
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.query = self.query.with_cancellation(token);
        self
    }

    pub fn query(&self) -> &QueryGateway<T> {
        &self.query
    }

    pub fn signer(&self) -> &S {
        &self.signer
    }

    pub fn config(&self) -> &ChainConfig {
        self.query.config()
    }

    /// Runs one attempt, submitting unless the request disables broadcasting
    pub async fn transact(&self, req: &TransactionRequest) -> GatewayResult<TxOutput> {
        self.transact_traced(req).await.result
    }

    /// Like [`transact`](Self::transact), also reporting the stage the attempt ended in
    pub async fn transact_traced(&self, req: &TransactionRequest) -> TransactOutcome {
        let signed = self.sign(req).await;
        let signed = match signed {
            Ok(signed) if !req.options.broadcast => {
                debug!(stage = ?TxStage::Signed, id = %signed.id(), "broadcast disabled");
                return TransactOutcome::from_result(TxStage::Signed, Ok(TxOutput::Signed(signed)))
            }
            Ok(signed) => signed,
            Err(failure) => return TransactOutcome::from_result(TxStage::Signed, Err(failure)),
        };
        let result = self.push_signed(&signed).await.map(TxOutput::Confirmed);
        TransactOutcome::from_result(TxStage::Confirmed, result)
    }

    /// Runs one attempt and always submits, ignoring the request's `broadcast` option
    pub async fn send_transaction(
        &self,
        req: &TransactionRequest,
    ) -> GatewayResult<TransactionReceipt> {
        let signed = self.sign(req).await?;
        self.push_signed(&signed).await
    }

    /// Builds and signs the transaction without submitting it
    pub async fn sign(&self, req: &TransactionRequest) -> GatewayResult<PackedTransaction> {
        let (tx, chain_id) = self.build(req).await?;
        let packed_trx = tx.packed();
        debug!(stage = ?TxStage::Built, id = %tx.id(), actions = tx.actions.len(), "transaction built");

        let available = self.signer.public_keys();
        let required = self
            .query
            .call(
                "get_required_keys",
                self.query.transport().get_required_keys(&tx, &available),
            )
            .await?;

        debug!(stage = ?TxStage::Signing, keys = required.len());
        let signatures = match cancellable(
            self.query.cancellation(),
            self.signer.sign_transaction(&packed_trx, &required, &chain_id),
        )
        .await
        {
            Some(Ok(signatures)) => signatures,
            Some(Err(err)) => {
                let failure = FailureInfo::from_error(ErrorKind::SigningFailed, err);
                debug!(stage = ?TxStage::SigningFailed, message = %failure.message);
                return Err(failure)
            }
            None => return Err(FailureInfo::cancelled()),
        };
        debug!(stage = ?TxStage::Signed, signatures = signatures.len());
        Ok(PackedTransaction::from_packed(packed_trx, signatures))
    }

    /// Submits a signed transaction.
    ///
    /// A chain exception reported by the node is [`ErrorKind::RemoteRejected`] with the node's
    /// diagnostic as the message. Failing to reach the node, including a gateway timeout in
    /// front of it, is [`ErrorKind::Network`].
    pub async fn push_signed(&self, tx: &PackedTransaction) -> GatewayResult<TransactionReceipt> {
        debug!(stage = ?TxStage::Submitting, id = %tx.id());
        let pushed =
            cancellable(self.query.cancellation(), self.query.transport().push_transaction(tx))
                .await;
        let failure = match pushed {
            Some(Ok(receipt)) => {
                debug!(stage = ?TxStage::Confirmed, id = %receipt.transaction_id);
                return Ok(receipt)
            }
            Some(Err(err)) => rejection(err),
            None => FailureInfo::cancelled(),
        };
        debug!(
            stage = ?TxStage::from_failure(failure.kind),
            kind = %failure.kind,
            message = %failure.message,
            "submission failed"
        );
        Err(failure)
    }

    /// References a recent block and assembles the transaction, returning it with the chain id
    async fn build(&self, req: &TransactionRequest) -> GatewayResult<(Transaction, Checksum256)> {
        let info = self.query.get_info().await.map_err(unreachable_chain)?;
        let blocks_behind = req.options.blocks_behind;
        let ref_block_id = if blocks_behind > 0 {
            let num = info.head_block_num.saturating_sub(blocks_behind).max(1);
            self.query.get_block(num).await.map_err(unreachable_chain)?.id
        } else {
            info.head_block_id
        };
        let head_block_time = info
            .head_block_time()
            .map_err(|err| FailureInfo::from_error(ErrorKind::Network, err))?;
        let expiration = head_block_time.saturating_add(req.options.expire_seconds);
        trace!(%ref_block_id, %expiration, "reference block");
        Ok((req.build(expiration, &ref_block_id), info.chain_id))
    }
}

/// Failures reading the chain state a transaction is built on are network failures
fn unreachable_chain(failure: FailureInfo) -> FailureInfo {
    match failure.kind {
        ErrorKind::Cancelled => failure,
        _ => failure.with_kind(ErrorKind::Network),
    }
}

/// Classifies a failed submission. Only a chain exception reported by the node is a rejection,
/// everything else leaves open whether the transaction reached the chain.
fn rejection<E: TransportError + 'static>(err: E) -> FailureInfo {
    let diagnostic = err
        .as_error_response()
        .filter(|api| api.is_chain_exception())
        .map(|api| api.diagnostic().to_owned());
    match diagnostic {
        Some(message) => FailureInfo::with_cause(ErrorKind::RemoteRejected, message, err),
        None => classify(err),
    }
}

/// Encodes a JSON ABI into the binary `abi_def` form `setabi` expects.
///
/// Malformed JSON, an unsupported version or an invalid name are
/// [`ErrorKind::InvalidArgument`] failures.
pub fn encode_abi(abi_json: &str) -> GatewayResult<Vec<u8>> {
    Ok(abi::encode_abi(abi_json)?)
}

/// Decodes a binary `abi_def`, the inverse of [`encode_abi`]
pub fn decode_abi(bytes: &[u8]) -> GatewayResult<AbiDef> {
    Ok(abi::decode_abi(bytes)?)
}
