#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]
//! Provides a unified interface for signing Antelope transactions.
//!
//! You can implement the [`Signer`] trait to extend functionality to other signers such as
//! hardware wallets, remote key services or `keosd`.
//!
//! Signers receive the packed transaction together with the keys the node asked for and the
//! chain id, and return one recoverable signature per key.
//!
//! ```no_run
//! use antelope_core::types::{Checksum256, Pack, PublicKey, TransactionRequest};
//! use antelope_signers::{LocalWallet, Signer};
//!
//! # async fn foo() -> Result<(), Box<dyn std::error::Error>> {
//! // instantiate the wallet
//! let wallet = "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3".parse::<LocalWallet>()?;
//! let keys: Vec<PublicKey> = wallet.public_keys();
//!
//! // sign a transaction
//! let tx = TransactionRequest::new().build(Default::default(), &Checksum256::default());
//! let chain_id = Checksum256::default();
//! let signatures = wallet.sign_transaction(&tx.packed(), &keys, &chain_id).await?;
//! assert_eq!(signatures[0].recover(&tx.signing_digest(&chain_id))?, keys[0]);
//! # Ok(())
//! # }
//! ```
mod wallet;
pub use wallet::{LocalWallet, WalletError, MAX_SIGNING_ATTEMPTS};

use antelope_core::types::{Checksum256, PublicKey, Signature};
use async_trait::async_trait;
use auto_impl::auto_impl;
use std::{error::Error, fmt::Debug};

/// Trait for signing transactions
///
/// Implement this trait to support different signing modes, e.g. Ledger, hosted etc.
#[async_trait]
#[auto_impl(&, Box, Arc)]
pub trait Signer: Debug + Send + Sync {
    type Error: Error + Send + Sync + 'static;

    /// Signs the packed transaction `packed_trx` for the chain `chain_id` with each of
    /// `required_keys`, returning the signatures in the same order
    async fn sign_transaction(
        &self,
        packed_trx: &[u8],
        required_keys: &[PublicKey],
        chain_id: &Checksum256,
    ) -> Result<Vec<Signature>, Self::Error>;

    /// Returns the public keys the signer can sign with
    fn public_keys(&self) -> Vec<PublicKey>;
}
