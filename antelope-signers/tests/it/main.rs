use antelope_core::types::{
    transaction::signing_digest, Action, Checksum256, Name, Pack, PermissionLevel, PublicKey,
    TimePointSec, TransactionRequest,
};
use antelope_signers::{LocalWallet, Signer};
use std::sync::Arc;

const DEV_WIF: &str = "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3";
const DEV_PUBLIC_KEY: &str = "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV";

fn chain_id() -> Checksum256 {
    "cf057bbfb72640471fd910bcb67639c22df9f92470936cddc1ade0e2f2e7dc4f".parse().unwrap()
}

#[tokio::test]
async fn signs_a_transaction_with_the_dev_key() {
    let wallet: LocalWallet = DEV_WIF.parse().unwrap();
    let dev_key: PublicKey = DEV_PUBLIC_KEY.parse().unwrap();
    assert_eq!(wallet.public_keys(), vec![dev_key]);

    let alice: Name = "alice".parse().unwrap();
    let action = Action::new(
        "eosio.token".parse().unwrap(),
        "transfer".parse().unwrap(),
        vec![PermissionLevel::new(alice, "active".parse().unwrap())],
        vec![0u8; 4],
    );
    let tx = TransactionRequest::new()
        .action(action)
        .build(TimePointSec::from_secs(1527854430), &Checksum256::default());
    let packed = tx.packed();

    let signatures = wallet.sign_transaction(&packed, &[dev_key], &chain_id()).await.unwrap();
    assert_eq!(signatures.len(), 1);
    assert!(signatures[0].to_string().starts_with("SIG_K1_"));
    assert_eq!(signatures[0].recover(&signing_digest(&chain_id(), &packed)).unwrap(), dev_key);
    // the digest commits to the chain
    assert_ne!(
        signatures[0].recover(&signing_digest(&Checksum256::default(), &packed)).ok(),
        Some(dev_key)
    );
}

#[tokio::test]
async fn shared_signers_sign_too() {
    let wallet = Arc::new(LocalWallet::new(&mut rand::thread_rng()));
    let keys = wallet.public_keys();
    let signatures = wallet.sign_transaction(b"tx", &keys, &chain_id()).await.unwrap();
    assert_eq!(signatures[0].recover(&signing_digest(&chain_id(), b"tx")).unwrap(), keys[0]);
}
