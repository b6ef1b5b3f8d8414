use antelope_core::types::{Checksum256, PackedTransaction, PublicKey, Signature};
use antelope_providers::MockRpc;
use antelope_signers::{LocalWallet, Signer};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

mod actions;
mod transact;

pub const CHAIN_ID: &str = "cf057bbfb72640471fd910bcb67639c22df9f92470936cddc1ade0e2f2e7dc4f";
pub const HEAD_BLOCK_ID: &str = "000004d2e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b5c6d7e8f90";
/// Block 1231, three behind the head, with a reference prefix of 0x01020304
pub const REF_BLOCK_ID: &str = "000004cfa1b2c3d4040302010000000000000000000000000000000000000000";
/// `2024-03-01T12:00:00`
pub const HEAD_BLOCK_SECS: u32 = 1709294400;
pub const DEV_WIF: &str = "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3";
pub const DEV_PUBLIC_KEY: &str = "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV";

pub fn dev_wallet() -> LocalWallet {
    DEV_WIF.parse().unwrap()
}

pub fn chain_info() -> Value {
    json!({
        "server_version": "d1bc8d3",
        "chain_id": CHAIN_ID,
        "head_block_num": 1234,
        "last_irreversible_block_num": 1200,
        "last_irreversible_block_id": "000004b0a1f5b5d8c4e8d9d0e2b1f4c3a6d8e9f0a1b2c3d4e5f60718293a4b5c",
        "head_block_id": HEAD_BLOCK_ID,
        "head_block_time": "2024-03-01T12:00:00.500",
        "head_block_producer": "eosio"
    })
}

pub fn ref_block() -> Value {
    json!({
        "id": REF_BLOCK_ID,
        "block_num": 1231,
        "ref_block_prefix": 16909060,
        "timestamp": "2024-03-01T11:59:58.500",
        "producer": "eosio"
    })
}

/// Queues the answers to everything a transaction needs before it is submitted
pub fn queue_chain_state(mock: &MockRpc) {
    mock.push(chain_info()).unwrap();
    mock.push(ref_block()).unwrap();
    mock.push(json!({ "required_keys": [DEV_PUBLIC_KEY] })).unwrap();
}

pub fn receipt(id: &str) -> Value {
    json!({
        "transaction_id": id,
        "processed": {"id": id, "receipt": {"status": "executed"}, "action_traces": []}
    })
}

/// The transaction the gateway submitted
pub fn pushed(mock: &MockRpc) -> PackedTransaction {
    let requests = mock.requests_to("push_transaction");
    assert_eq!(requests.len(), 1);
    serde_json::from_value(requests[0].clone().unwrap()).unwrap()
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("device unplugged")]
pub struct Unplugged;

/// A signer whose device is gone
#[derive(Debug)]
pub struct FailingSigner;

#[async_trait]
impl Signer for FailingSigner {
    type Error = Unplugged;

    async fn sign_transaction(
        &self,
        _packed_trx: &[u8],
        _required_keys: &[PublicKey],
        _chain_id: &Checksum256,
    ) -> Result<Vec<Signature>, Unplugged> {
        Err(Unplugged)
    }

    fn public_keys(&self) -> Vec<PublicKey> {
        vec![DEV_PUBLIC_KEY.parse().unwrap()]
    }
}

/// A signer waiting for a confirmation that never comes
#[derive(Debug)]
pub struct StalledSigner;

#[async_trait]
impl Signer for StalledSigner {
    type Error = Unplugged;

    async fn sign_transaction(
        &self,
        _packed_trx: &[u8],
        _required_keys: &[PublicKey],
        _chain_id: &Checksum256,
    ) -> Result<Vec<Signature>, Unplugged> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(Unplugged)
    }

    fn public_keys(&self) -> Vec<PublicKey> {
        vec![DEV_PUBLIC_KEY.parse().unwrap()]
    }
}
