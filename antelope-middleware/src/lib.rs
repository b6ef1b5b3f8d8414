#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]
//! # Antelope transaction gateway
//!
//! The [`TransactGateway`] assembles a transaction against the chain's current state, has the
//! injected [`Signer`](antelope_signers::Signer) sign it and submits it, normalizing every
//! outcome into a [`GatewayResult`](antelope_core::failure::GatewayResult).
//!
//! An attempt moves through the [`TxStage`]s
//! `Built -> Signing -> Signed -> Submitting` and ends in exactly one terminal stage:
//! - [`Confirmed`](TxStage::Confirmed): the node executed the transaction
//! - [`Signed`](TxStage::Signed): broadcasting was disabled
//! - [`Rejected`](TxStage::Rejected): the node refused it, reported as
//!   [`RemoteRejected`](antelope_core::failure::ErrorKind::RemoteRejected)
//! - [`NetworkFailed`](TxStage::NetworkFailed), [`SigningFailed`](TxStage::SigningFailed) or
//!   [`Cancelled`](TxStage::Cancelled)
//!
//! Submissions are never retried.
//!
//! ## Example
//!
//! ```no_run
//! use antelope_middleware::TransactGateway;
//! use antelope_providers::{Http, Provider};
//! use antelope_signers::LocalWallet;
//! use std::convert::TryFrom;
//!
//! # async fn foo() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Provider::<Http>::try_from("http://127.0.0.1:8888")?;
//! let wallet: LocalWallet = "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3".parse()?;
//! let gateway = TransactGateway::new(provider, wallet);
//!
//! let receipt = gateway
//!     .transfer("alice", "bob", "1.0000 EOS".parse()?, "lunch", None, "active")
//!     .await?;
//! println!("transferred in {}", receipt.transaction_id);
//! # Ok(())
//! # }
//! ```
pub mod transact;
pub use transact::{decode_abi, encode_abi, TransactGateway, TransactOutcome, TxOutput, TxStage};

/// Helpers building the common system and token actions
pub mod actions;
