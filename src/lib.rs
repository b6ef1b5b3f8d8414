#![warn(missing_debug_implementations, rust_2018_idioms, unreachable_pub)]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! # antelope-rs
//!
//! A client library for [Antelope](https://antelope.io) (EOSIO) chains.
//!
//! # Quickstart
//!
//! A prelude is provided which imports all the important things for you. Reads go through the
//! [`QueryGateway`](providers::QueryGateway), writes through the
//! [`TransactGateway`](middleware::TransactGateway). Both report every failure as a
//! [`FailureInfo`](core::failure::FailureInfo) carrying an
//! [`ErrorKind`](core::failure::ErrorKind).
//!
//! ```no_run
//! use antelope::prelude::*;
//! use std::convert::TryFrom;
//!
//! # async fn foo() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Provider::<Http>::try_from("http://127.0.0.1:8888")?;
//!
//! // read the chain
//! let query = QueryGateway::new(&provider);
//! let account = query.get_account("alice").await?;
//! println!("{account:?}");
//!
//! // and write to it
//! let wallet: LocalWallet = "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3".parse()?;
//! let gateway = TransactGateway::new(&provider, wallet);
//! let receipt = gateway
//!     .transfer("alice", "bob", "1.0000 EOS".parse()?, "", None, "active")
//!     .await?;
//! println!("{}", receipt.transaction_id);
//! # Ok(())
//! # }
//! ```
//!
//! # Testing
//!
//! [`Provider::mocked`](providers::Provider::mocked) returns a provider backed by
//! [`MockRpc`](providers::MockRpc), which answers requests from a queue of canned responses
//! and records every request it receives.

/// # Antelope types, binary packing and the failure model
///
/// Names, assets, keys, transactions and their canonical binary form, the ABI codec and
/// [`FailureInfo`](core::failure::FailureInfo).
pub mod core {
    pub use antelope_core::*;
}

/// # Clients for interacting with Antelope nodes
///
/// The [`Transport`](providers::Transport) trait with its HTTP and mock implementations, and
/// the read-only [`QueryGateway`](providers::QueryGateway).
pub mod providers {
    pub use antelope_providers::*;
}

/// # Transaction signers
///
/// The [`Signer`](signers::Signer) trait and the in-memory
/// [`LocalWallet`](signers::LocalWallet).
pub mod signers {
    pub use antelope_signers::*;
}

/// # Transaction gateway
///
/// Builds, signs and submits transactions, plus helpers for common system and token actions.
pub mod middleware {
    pub use antelope_middleware::*;
}

/// Easy imports of frequently used type definitions and traits
pub mod prelude {
    pub use super::core::{
        failure::{ErrorKind, FailureInfo, GatewayResult},
        types::*,
    };
    pub use super::middleware::{TransactGateway, TransactOutcome, TxOutput, TxStage};
    pub use super::providers::{Http, MockRpc, Provider, QueryGateway, Transport};
    pub use super::signers::{LocalWallet, Signer};
}
