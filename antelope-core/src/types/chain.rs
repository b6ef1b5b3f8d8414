//! Typed views over the read-only chain API responses.
//!
//! Each view types the fields the gateways rely on and captures everything else in
//! [`OtherFields`], so a payload passes through deserialization unchanged.
use super::{Checksum256, Name, OtherFields, TimeError, TimePointSec};
use crate::abi::AbiDef;
use serde::{Deserialize, Serialize};

/// Response of `get_info`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainInfo {
    pub server_version: String,
    pub chain_id: Checksum256,
    pub head_block_num: u32,
    pub last_irreversible_block_num: u32,
    pub last_irreversible_block_id: Checksum256,
    pub head_block_id: Checksum256,
    /// Timestamp in the node's `YYYY-MM-DDTHH:MM:SS.sss` form
    pub head_block_time: String,
    pub head_block_producer: Name,
    #[serde(flatten)]
    pub other: OtherFields,
}

impl ChainInfo {
    /// The head block time truncated to seconds
    pub fn head_block_time(&self) -> Result<TimePointSec, TimeError> {
        self.head_block_time.parse()
    }
}

/// Response of `get_account`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub account_name: Name,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_liquid_balance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram_quota: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram_usage: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privileged: Option<bool>,
    #[serde(flatten)]
    pub other: OtherFields,
}

/// Response of `get_code`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeInfo {
    pub account_name: Name,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_hash: Option<Checksum256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wast: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wasm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abi: Option<serde_json::Value>,
    #[serde(flatten)]
    pub other: OtherFields,
}

impl CodeInfo {
    /// Whether the account has a contract deployed
    pub fn has_code(&self) -> bool {
        self.code_hash.map(|hash| hash != Checksum256::default()).unwrap_or(false)
    }

    /// The deployed ABI. `None` when the account has none or the node's copy does not parse.
    pub fn abi_def(&self) -> Option<AbiDef> {
        self.abi.as_ref().and_then(|abi| AbiDef::deserialize(abi).ok())
    }
}

/// One producer entry of a schedule. The signing authority's shape changed across versions
/// and is kept untyped in `other`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerKey {
    pub producer_name: Name,
    #[serde(flatten)]
    pub other: OtherFields,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleInfo {
    pub version: u32,
    pub producers: Vec<ProducerKey>,
}

/// Response of `get_producer_schedule`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerSchedule {
    pub active: Option<ScheduleInfo>,
    pub pending: Option<ScheduleInfo>,
    pub proposed: Option<ScheduleInfo>,
}

/// Response of `get_producers`.
///
/// Rows are objects when queried with `json = true` and hex strings otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerList {
    pub rows: Vec<serde_json::Value>,
    pub total_producer_vote_weight: String,
    /// Lower bound of the next page, empty when there is none
    pub more: String,
}

impl ProducerList {
    pub fn has_more(&self) -> bool {
        !self.more.is_empty()
    }
}

/// Identifies a block by number or by id, the `block_num_or_id` parameter of `get_block`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockId {
    Number(u32),
    Id(Checksum256),
}

impl From<u32> for BlockId {
    fn from(num: u32) -> Self {
        BlockId::Number(num)
    }
}

impl From<Checksum256> for BlockId {
    fn from(id: Checksum256) -> Self {
        BlockId::Id(id)
    }
}

/// Response of `get_block`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
    pub id: Checksum256,
    pub block_num: u32,
    pub ref_block_prefix: u32,
    pub timestamp: String,
    pub producer: Name,
    #[serde(flatten)]
    pub other: OtherFields,
}

impl BlockInfo {
    pub fn timestamp(&self) -> Result<TimePointSec, TimeError> {
        self.timestamp.parse()
    }
}
