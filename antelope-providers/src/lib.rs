#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]
#![allow(clippy::type_complexity)]
//! # Clients for interacting with Antelope nodes
//!
//! This crate provides asynchronous clients for the chain API of an
//! [Antelope](https://antelope.io) (EOSIO) node and the [`QueryGateway`], which turns every
//! read-only call into a [`GatewayResult`](antelope_core::failure::GatewayResult).
//!
//! For the typed calls, refer to the [`Transport`] trait implemented by
//! [`Provider`](crate::Provider).
//!
//! # Examples
//!
//! ```no_run
//! use antelope_providers::{Http, Provider, QueryGateway};
//! use std::convert::TryFrom;
//!
//! # async fn foo() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Provider::<Http>::try_from("http://127.0.0.1:8888")?;
//! let gateway = QueryGateway::new(provider);
//!
//! let info = gateway.get_info().await?;
//! println!("head block: {}", info.head_block_num);
//!
//! let balance = gateway.get_balance("alice", None, None).await?;
//! println!("balance: {balance:?}");
//! # Ok(())
//! # }
//! ```
mod errors;
pub use errors::{ProviderError, TransportError};

mod rpc;
pub use rpc::*;

mod transport;
pub use transport::Transport;

mod gateway;
pub use gateway::{classify, QueryGateway};

/// Helpers shared by the gateways
pub mod utils;

use async_trait::async_trait;
use auto_impl::auto_impl;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

#[async_trait]
#[auto_impl(&, Box, Arc)]
/// Trait which must be implemented by data transports to be used with the chain API
/// [`Provider`].
pub trait RpcClient: Debug + Send + Sync {
    /// A client error
    type Error: TransportError + Into<ProviderError>;

    /// Sends a request to the given chain API endpoint with the parameters serialized as the
    /// JSON body
    async fn request<T, R>(&self, endpoint: &str, params: T) -> Result<R, Self::Error>
    where
        T: Debug + Serialize + Send + Sync,
        R: Serialize + DeserializeOwned;
}
