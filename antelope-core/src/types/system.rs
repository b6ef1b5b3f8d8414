//! Typed arguments of the system and token contract actions the gateway builds itself.
//!
//! Each struct packs to the exact argument layout the contract's ABI declares, so these
//! actions can be built without fetching or interpreting an ABI.
use super::{
    impl_pack_struct, Asset, Bytes, Decoder, Encoder, Name, Pack, PackError, PermissionLevel,
    PublicKey, Unpack,
};
use serde::{Deserialize, Serialize};

/// Well known action and permission names
pub mod names {
    use crate::types::Name;

    pub const ACTIVE: Name = Name::new(3617214756542218240);
    pub const OWNER: Name = Name::new(12044502819693133824);
    pub const TRANSFER: Name = Name::new(14829575313431724032);
    pub const NEWACCOUNT: Name = Name::new(11148770977341390848);
    pub const BUYRAMBYTES: Name = Name::new(4520896358299381760);
    pub const DELEGATEBW: Name = Name::new(5378043540636893184);
    pub const SETCODE: Name = Name::new(14029427681804681216);
    pub const SETABI: Name = Name::new(14029385431137648640);
}

/// `transfer` of a token contract
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: Name,
    pub to: Name,
    pub quantity: Asset,
    pub memo: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyWeight {
    pub key: PublicKey,
    pub weight: u16,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionLevelWeight {
    pub permission: PermissionLevel,
    pub weight: u16,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitWeight {
    pub wait_sec: u32,
    pub weight: u16,
}

/// The weighted keys, accounts and delays that satisfy a permission
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authority {
    pub threshold: u32,
    pub keys: Vec<KeyWeight>,
    pub accounts: Vec<PermissionLevelWeight>,
    pub waits: Vec<WaitWeight>,
}

impl Authority {
    /// An authority satisfied by a signature of `key` alone
    pub fn single_key(key: PublicKey) -> Self {
        Self {
            threshold: 1,
            keys: vec![KeyWeight { key, weight: 1 }],
            accounts: Vec::new(),
            waits: Vec::new(),
        }
    }
}

/// `newaccount` of the system contract
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    pub creator: Name,
    pub name: Name,
    pub owner: Authority,
    pub active: Authority,
}

/// `buyrambytes` of the system contract
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyRamBytes {
    pub payer: Name,
    pub receiver: Name,
    pub bytes: u32,
}

/// `delegatebw` of the system contract
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegateBw {
    pub from: Name,
    pub receiver: Name,
    pub stake_net_quantity: Asset,
    pub stake_cpu_quantity: Asset,
    /// Whether the stake is given to `receiver` rather than lent
    pub transfer: bool,
}

/// `setcode` of the system contract
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCode {
    pub account: Name,
    pub vmtype: u8,
    pub vmversion: u8,
    pub code: Bytes,
}

/// `setabi` of the system contract, `abi` being the binary `abi_def`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetAbi {
    pub account: Name,
    pub abi: Bytes,
}

impl_pack_struct!(Transfer { from, to, quantity, memo });
impl_pack_struct!(KeyWeight { key, weight });
impl_pack_struct!(PermissionLevelWeight { permission, weight });
impl_pack_struct!(WaitWeight { wait_sec, weight });
impl_pack_struct!(Authority { threshold, keys, accounts, waits });
impl_pack_struct!(NewAccount { creator, name, owner, active });
impl_pack_struct!(BuyRamBytes { payer, receiver, bytes });
impl_pack_struct!(DelegateBw { from, receiver, stake_net_quantity, stake_cpu_quantity, transfer });
impl_pack_struct!(SetCode { account, vmtype, vmversion, code });
impl_pack_struct!(SetAbi { account, abi });
