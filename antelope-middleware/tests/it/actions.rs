use crate::*;
use antelope_core::{
    abi::decode_abi,
    failure::ErrorKind,
    types::{
        system::{names, DelegateBw, SetAbi, SetCode, Transfer},
        Checksum256, Name, Unpack,
    },
};
use antelope_middleware::TransactGateway;
use antelope_providers::Provider;
use serde_json::json;

const ID: &str = "1b3eca3c3fb14089f0e2fda71dfc48aa0277f5a86d3d6e6aa2ba2a57788126ba";
const HELLO_ABI: &str = r#"{
    "version": "eosio::abi/1.1",
    "structs": [{"name": "hi", "base": "", "fields": [{"name": "user", "type": "name"}]}],
    "actions": [{"name": "hi", "type": "hi", "ricardian_contract": ""}]
}"#;

fn name(s: &str) -> Name {
    s.parse().unwrap()
}

#[tokio::test]
async fn transfer_packs_the_token_action() {
    let (provider, mock) = Provider::mocked();
    queue_chain_state(&mock);
    mock.push(receipt(ID)).unwrap();
    let gateway = TransactGateway::new(provider, dev_wallet());

    let receipt = gateway
        .transfer("alice", "bob", "1.0000 EOS".parse().unwrap(), "memo", None, "active")
        .await
        .unwrap();
    assert_eq!(receipt.transaction_id.to_string(), ID);

    let tx = pushed(&mock).transaction().unwrap();
    assert_eq!(tx.actions.len(), 1);
    let action = &tx.actions[0];
    assert_eq!(action.account, name("eosio.token"));
    assert_eq!(action.name, names::TRANSFER);
    assert_eq!(action.authorization[0].to_string(), "alice@active");
    assert_eq!(
        hex::encode(&action.data),
        "0000000000855c340000000000000e3d102700000000000004454f5300000000046d656d6f"
    );
}

#[tokio::test]
async fn transfer_of_another_token() {
    let (provider, mock) = Provider::mocked();
    queue_chain_state(&mock);
    mock.push(receipt(ID)).unwrap();
    let gateway = TransactGateway::new(provider, dev_wallet());

    gateway
        .transfer("alice", "bob", "5.00 USD".parse().unwrap(), "", Some("fiat.token"), "owner")
        .await
        .unwrap();
    let action = pushed(&mock).transaction().unwrap().actions.remove(0);
    assert_eq!(action.account, name("fiat.token"));
    assert_eq!(action.authorization[0].permission, names::OWNER);
    let args = Transfer::unpacked(&action.data).unwrap();
    assert_eq!(args.quantity.to_string(), "5.00 USD");
}

#[tokio::test]
async fn invalid_names_fail_locally() {
    let (provider, mock) = Provider::mocked();
    let gateway = TransactGateway::new(provider, dev_wallet());

    let failure = gateway
        .transfer("Alice!", "bob", "1.0000 EOS".parse().unwrap(), "", None, "active")
        .await
        .unwrap_err();
    assert_eq!(failure.kind, ErrorKind::InvalidArgument);

    let failure =
        gateway.push_action("hello", "hi", Vec::<u8>::new(), &[("alice", "not a name")]).await.unwrap_err();
    assert_eq!(failure.kind, ErrorKind::InvalidArgument);
    assert!(mock.requested_endpoints().is_empty());
}

#[tokio::test]
async fn push_action_forwards_packed_data() {
    let (provider, mock) = Provider::mocked();
    queue_chain_state(&mock);
    mock.push(receipt(ID)).unwrap();
    let gateway = TransactGateway::new(provider, dev_wallet());

    let data = vec![0x00, 0x00, 0x00, 0x00, 0x00, 0x85, 0x5c, 0x34];
    gateway.push_action("hello", "hi", data.clone(), &[("alice", "active")]).await.unwrap();

    let action = pushed(&mock).transaction().unwrap().actions.remove(0);
    assert_eq!(action.account, name("hello"));
    assert_eq!(action.name, name("hi"));
    assert_eq!(action.data.to_vec(), data);
}

#[tokio::test]
async fn create_account_with_resources() {
    let (provider, mock) = Provider::mocked();
    queue_chain_state(&mock);
    mock.push(receipt(ID)).unwrap();
    let gateway = TransactGateway::new(provider, dev_wallet());
    let key = DEV_PUBLIC_KEY.parse().unwrap();

    gateway.create_account("eosio", "alice", key, key, 8192, 1.0, 0.5).await.unwrap();

    let tx = pushed(&mock).transaction().unwrap();
    let names: Vec<_> = tx.actions.iter().map(|a| a.name).collect();
    assert_eq!(names, vec![names::NEWACCOUNT, names::BUYRAMBYTES, names::DELEGATEBW]);
    assert!(tx.actions.iter().all(|a| a.account == name("eosio")));
    assert!(tx.actions.iter().all(|a| a.authorization[0].to_string() == "eosio@active"));

    assert_eq!(hex::encode(&tx.actions[1].data), "0000000000ea30550000000000855c3400200000");
    let stake = DelegateBw::unpacked(&tx.actions[2].data).unwrap();
    assert_eq!(stake.stake_net_quantity.to_string(), "1.0000 EOS");
    assert_eq!(stake.stake_cpu_quantity.to_string(), "0.5000 EOS");
    assert!(stake.transfer);
}

#[tokio::test]
async fn create_account_without_resources() {
    let (provider, mock) = Provider::mocked();
    queue_chain_state(&mock);
    mock.push(receipt(ID)).unwrap();
    let gateway = TransactGateway::new(provider, dev_wallet());
    let key = DEV_PUBLIC_KEY.parse().unwrap();

    gateway.create_account("eosio", "bob", key, key, 0, 0.0, 0.0).await.unwrap();
    let tx = pushed(&mock).transaction().unwrap();
    assert_eq!(tx.actions.len(), 1);
    assert_eq!(tx.actions[0].name, names::NEWACCOUNT);
}

#[tokio::test]
async fn deploy_sets_code_and_abi() {
    let (provider, mock) = Provider::mocked();
    let code = b"\x00asm\x01\x00\x00\x00";
    mock.push(json!({"account_name": "hello", "code_hash": Checksum256::default()})).unwrap();
    queue_chain_state(&mock);
    mock.push(receipt(ID)).unwrap();
    let gateway = TransactGateway::new(provider, dev_wallet());

    gateway.deploy_contract("hello", code, HELLO_ABI, 0, 0).await.unwrap();

    let tx = pushed(&mock).transaction().unwrap();
    assert_eq!(tx.actions.len(), 2);
    assert_eq!(tx.actions[0].name, names::SETCODE);
    let setcode = SetCode::unpacked(&tx.actions[0].data).unwrap();
    assert_eq!(setcode.code.to_vec(), code.to_vec());
    assert_eq!(setcode.account, name("hello"));

    assert_eq!(tx.actions[1].name, names::SETABI);
    let setabi = SetAbi::unpacked(&tx.actions[1].data).unwrap();
    let abi = decode_abi(&setabi.abi).unwrap();
    assert_eq!(abi.action_type("hi"), Some("hi"));
}

#[tokio::test]
async fn deploy_skips_unchanged_code() {
    let (provider, mock) = Provider::mocked();
    let code = b"\x00asm\x01\x00\x00\x00";
    mock.push(json!({"account_name": "hello", "code_hash": Checksum256::hash(code)})).unwrap();
    queue_chain_state(&mock);
    mock.push(receipt(ID)).unwrap();
    let gateway = TransactGateway::new(provider, dev_wallet());

    gateway.deploy_contract("hello", code, HELLO_ABI, 0, 0).await.unwrap();
    let tx = pushed(&mock).transaction().unwrap();
    assert_eq!(tx.actions.len(), 1);
    assert_eq!(tx.actions[0].name, names::SETABI);
}

/// `get_code` of an account running `code` under `HELLO_ABI`, as a node reports it
fn deployed_hello(code_hash: Checksum256) -> serde_json::Value {
    let mut abi: serde_json::Value = serde_json::from_str(HELLO_ABI).unwrap();
    abi["variants"] = json!([]);
    abi["action_results"] = json!([]);
    json!({"account_name": "hello", "code_hash": code_hash, "abi": abi})
}

#[tokio::test]
async fn deploy_skips_unchanged_abi() {
    let (provider, mock) = Provider::mocked();
    let code = b"\x00asm\x01\x00\x00\x00";
    mock.push(deployed_hello(Checksum256::default())).unwrap();
    queue_chain_state(&mock);
    mock.push(receipt(ID)).unwrap();
    let gateway = TransactGateway::new(provider, dev_wallet());

    let receipt = gateway.deploy_contract("hello", code, HELLO_ABI, 0, 0).await.unwrap();
    assert!(receipt.is_some());
    let tx = pushed(&mock).transaction().unwrap();
    assert_eq!(tx.actions.len(), 1);
    assert_eq!(tx.actions[0].name, names::SETCODE);
}

#[tokio::test]
async fn deploy_of_an_unchanged_contract_submits_nothing() {
    let (provider, mock) = Provider::mocked();
    let code = b"\x00asm\x01\x00\x00\x00";
    mock.push(deployed_hello(Checksum256::hash(code))).unwrap();
    let gateway = TransactGateway::new(provider, dev_wallet());

    let receipt = gateway.deploy_contract("hello", code, HELLO_ABI, 0, 0).await.unwrap();
    assert_eq!(receipt, None);
    assert_eq!(mock.requested_endpoints(), vec!["get_code"]);
}

#[tokio::test]
async fn deploy_rejects_malformed_abi_locally() {
    let (provider, mock) = Provider::mocked();
    let gateway = TransactGateway::new(provider, dev_wallet());

    let failure = gateway.deploy_contract("hello", b"\x00asm", "{", 0, 0).await.unwrap_err();
    assert_eq!(failure.kind, ErrorKind::InvalidArgument);
    assert!(mock.requested_endpoints().is_empty());
}
