//! Transactions in their packed wire form and the request/receipt types around them
use super::{
    Bytes, Checksum256, Decoder, Encoder, Name, OtherFields, Pack, PackError, Signature,
    TimePointSec, Unpack,
};
use serde::{Deserialize, Serialize};

/// Default number of blocks behind the head the reference block is taken from
pub const DEFAULT_BLOCKS_BEHIND: u32 = 3;

/// Default lifetime of a transaction, in seconds past the reference block time
pub const DEFAULT_EXPIRE_SECONDS: u32 = 30;

/// An `actor@permission` pair authorizing an action
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PermissionLevel {
    pub actor: Name,
    pub permission: Name,
}

impl PermissionLevel {
    pub fn new(actor: Name, permission: Name) -> Self {
        Self { actor, permission }
    }
}

impl std::fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.actor, self.permission)
    }
}

impl Pack for PermissionLevel {
    fn pack(&self, enc: &mut Encoder) {
        self.actor.pack(enc);
        self.permission.pack(enc);
    }
}

impl Unpack for PermissionLevel {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, PackError> {
        Ok(Self { actor: Name::unpack(dec)?, permission: Name::unpack(dec)? })
    }
}

/// A contract call. `data` holds the action's arguments already packed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub account: Name,
    pub name: Name,
    pub authorization: Vec<PermissionLevel>,
    pub data: Bytes,
}

impl Action {
    pub fn new(
        account: Name,
        name: Name,
        authorization: Vec<PermissionLevel>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self { account, name, authorization, data: data.into() }
    }

    /// Creates an action packing `args` as its data
    pub fn from_args<T: Pack>(
        account: Name,
        name: Name,
        authorization: Vec<PermissionLevel>,
        args: &T,
    ) -> Self {
        Self::new(account, name, authorization, args.packed())
    }
}

impl Pack for Action {
    fn pack(&self, enc: &mut Encoder) {
        self.account.pack(enc);
        self.name.pack(enc);
        self.authorization.pack(enc);
        self.data.pack(enc);
    }
}

impl Unpack for Action {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, PackError> {
        Ok(Self {
            account: Name::unpack(dec)?,
            name: Name::unpack(dec)?,
            authorization: Vec::unpack(dec)?,
            data: Bytes::unpack(dec)?,
        })
    }
}

/// The fields binding a transaction to a recent block and bounding its lifetime and resources
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHeader {
    pub expiration: TimePointSec,
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,
    /// Upper limit on NET usage in 8-byte words, 0 for no limit beyond the account's
    pub max_net_usage_words: u32,
    /// Upper limit on CPU usage in milliseconds, 0 for no limit beyond the account's
    pub max_cpu_usage_ms: u8,
    pub delay_sec: u32,
}

impl TransactionHeader {
    /// A header referencing the block `ref_block_id` and expiring at `expiration`
    pub fn new(expiration: TimePointSec, ref_block_id: &Checksum256) -> Self {
        Self {
            expiration,
            ref_block_num: (ref_block_id.block_num() & 0xffff) as u16,
            ref_block_prefix: ref_block_id.ref_block_prefix(),
            ..Default::default()
        }
    }
}

impl Pack for TransactionHeader {
    fn pack(&self, enc: &mut Encoder) {
        self.expiration.pack(enc);
        self.ref_block_num.pack(enc);
        self.ref_block_prefix.pack(enc);
        enc.write_varuint32(self.max_net_usage_words);
        self.max_cpu_usage_ms.pack(enc);
        enc.write_varuint32(self.delay_sec);
    }
}

impl Unpack for TransactionHeader {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, PackError> {
        Ok(Self {
            expiration: TimePointSec::unpack(dec)?,
            ref_block_num: u16::unpack(dec)?,
            ref_block_prefix: u32::unpack(dec)?,
            max_net_usage_words: dec.read_varuint32()?,
            max_cpu_usage_ms: u8::unpack(dec)?,
            delay_sec: dec.read_varuint32()?,
        })
    }
}

/// An unsigned transaction
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(flatten)]
    pub header: TransactionHeader,
    #[serde(default)]
    pub context_free_actions: Vec<Action>,
    pub actions: Vec<Action>,
    #[serde(default)]
    pub transaction_extensions: Vec<(u16, Bytes)>,
}

impl Transaction {
    pub fn new(header: TransactionHeader, actions: Vec<Action>) -> Self {
        Self { header, actions, ..Default::default() }
    }

    /// The transaction id, the SHA-256 of the packed transaction
    pub fn id(&self) -> Checksum256 {
        Checksum256::hash(self.packed())
    }

    /// The digest signatures are made over: `sha256(chain_id ‖ packed ‖ [0u8; 32])`, the
    /// trailing zeros standing for the digest of empty context free data
    pub fn signing_digest(&self, chain_id: &Checksum256) -> [u8; 32] {
        signing_digest(chain_id, &self.packed())
    }
}

/// Computes the signing digest of an already packed transaction
pub fn signing_digest(chain_id: &Checksum256, packed_trx: &[u8]) -> [u8; 32] {
    let mut buf = Vec::with_capacity(32 + packed_trx.len() + 32);
    buf.extend_from_slice(chain_id.as_bytes());
    buf.extend_from_slice(packed_trx);
    buf.extend_from_slice(&[0u8; 32]);
    crate::utils::sha256(buf)
}

impl Pack for Transaction {
    fn pack(&self, enc: &mut Encoder) {
        self.header.pack(enc);
        self.context_free_actions.pack(enc);
        self.actions.pack(enc);
        self.transaction_extensions.pack(enc);
    }
}

impl Unpack for Transaction {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, PackError> {
        Ok(Self {
            header: TransactionHeader::unpack(dec)?,
            context_free_actions: Vec::unpack(dec)?,
            actions: Vec::unpack(dec)?,
            transaction_extensions: Vec::unpack(dec)?,
        })
    }
}

/// A signed transaction ready for `push_transaction`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedTransaction {
    pub signatures: Vec<Signature>,
    /// Always 0, compressed payloads are not produced
    pub compression: u8,
    pub packed_context_free_data: Bytes,
    pub packed_trx: Bytes,
}

impl PackedTransaction {
    pub fn new(tx: &Transaction, signatures: Vec<Signature>) -> Self {
        Self::from_packed(tx.packed(), signatures)
    }

    pub fn from_packed(packed_trx: impl Into<Bytes>, signatures: Vec<Signature>) -> Self {
        Self {
            signatures,
            compression: 0,
            packed_context_free_data: Bytes::default(),
            packed_trx: packed_trx.into(),
        }
    }

    /// Unpacks the transaction carried by this envelope
    pub fn transaction(&self) -> Result<Transaction, PackError> {
        Transaction::unpacked(&self.packed_trx)
    }

    pub fn id(&self) -> Checksum256 {
        Checksum256::hash(&self.packed_trx)
    }
}

/// Response of `push_transaction`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub transaction_id: Checksum256,
    /// The execution trace as returned by the node
    pub processed: serde_json::Value,
    #[serde(flatten)]
    pub other: OtherFields,
}

/// Per-call transaction assembly options
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactOptions {
    /// How far behind the head block the reference block is taken. 0 references the head.
    pub blocks_behind: u32,
    pub expire_seconds: u32,
    /// When false the signed transaction is returned instead of being submitted
    pub broadcast: bool,
    pub max_net_usage_words: u32,
    pub max_cpu_usage_ms: u8,
    pub delay_sec: u32,
}

impl Default for TransactOptions {
    fn default() -> Self {
        Self {
            blocks_behind: DEFAULT_BLOCKS_BEHIND,
            expire_seconds: DEFAULT_EXPIRE_SECONDS,
            broadcast: true,
            max_net_usage_words: 0,
            max_cpu_usage_ms: 0,
            delay_sec: 0,
        }
    }
}

/// The caller-owned description of a transaction to build, sign and submit
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub actions: Vec<Action>,
    #[serde(default)]
    pub context_free_actions: Vec<Action>,
    #[serde(default)]
    pub options: TransactOptions,
}

impl TransactionRequest {
    /// Creates an empty request with default options
    pub fn new() -> Self {
        Self::default()
    }

    // Builder pattern helpers

    /// Appends an action
    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Appends a context free action
    #[must_use]
    pub fn context_free_action(mut self, action: Action) -> Self {
        self.context_free_actions.push(action);
        self
    }

    #[must_use]
    pub fn options(mut self, options: TransactOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn blocks_behind(mut self, blocks_behind: u32) -> Self {
        self.options.blocks_behind = blocks_behind;
        self
    }

    #[must_use]
    pub fn expire_seconds(mut self, expire_seconds: u32) -> Self {
        self.options.expire_seconds = expire_seconds;
        self
    }

    #[must_use]
    pub fn broadcast(mut self, broadcast: bool) -> Self {
        self.options.broadcast = broadcast;
        self
    }

    /// Assembles the transaction against the given reference block
    pub fn build(&self, expiration: TimePointSec, ref_block_id: &Checksum256) -> Transaction {
        let mut header = TransactionHeader::new(expiration, ref_block_id);
        header.max_net_usage_words = self.options.max_net_usage_words;
        header.max_cpu_usage_ms = self.options.max_cpu_usage_ms;
        header.delay_sec = self.options.delay_sec;
        Transaction {
            header,
            context_free_actions: self.context_free_actions.clone(),
            actions: self.actions.clone(),
            transaction_extensions: Vec::new(),
        }
    }
}
