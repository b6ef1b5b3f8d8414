//! Antelope data types

mod name;
pub use name::{Name, NameError};

mod asset;
pub use asset::{Asset, AssetError, Symbol};

mod bytes;
pub use self::bytes::{deserialize_bytes, serialize_bytes, Bytes, ParseBytesError};

mod checksum;
pub use checksum::Checksum256;

mod crypto;
pub use crypto::{KeyError, KeyType, PublicKey, Signature};

mod packer;
pub(crate) use packer::impl_pack_struct;
pub use packer::{Decoder, Encoder, Pack, PackError, Unpack, VarUint32};

mod other;
pub use other::OtherFields;

mod chain;
pub use chain::{
    AccountInfo, BlockId, BlockInfo, ChainInfo, CodeInfo, ProducerKey, ProducerList,
    ProducerSchedule, ScheduleInfo,
};

mod table;
pub use table::{PayerRow, RowPage, TableQuery, TableQueryError, DEFAULT_ROW_LIMIT};

mod time;
pub use time::{TimeError, TimePointSec};

pub mod transaction;
pub use transaction::{
    Action, PackedTransaction, PermissionLevel, Transaction, TransactionHeader,
    TransactionReceipt, TransactionRequest, TransactOptions,
};

mod config;
pub use config::ChainConfig;

pub mod system;
