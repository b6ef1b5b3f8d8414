#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]
//! Antelope types, binary packing and utilities.
//!
//! This library provides type definitions for the data an Antelope (EOSIO) node exchanges with
//! its clients, the canonical binary packing used for transactions and ABIs, and the
//! [`FailureInfo`](failure::FailureInfo) model every gateway operation reports failures with.
//!
//! ## Names and assets
//!
//! ```rust
//! use antelope_core::types::{Asset, Name};
//!
//! let name: Name = "eosio.token".parse().unwrap();
//! assert_eq!(name.to_string(), "eosio.token");
//!
//! let quantity: Asset = "10.0000 EOS".parse().unwrap();
//! assert_eq!(quantity.amount(), 100_000);
//! assert_eq!(quantity.to_string(), "10.0000 EOS");
//! ```
//!
//! # ABI Encoding and Decoding
//!
//! The [`abi`] module converts JSON ABI descriptions into the binary `abi_def` encoding the
//! system contract's `setabi` action expects, and back.
pub mod types;

pub mod abi;

pub mod failure;

/// Helpers around external script compilers
pub mod compiler;

/// Various utilities
pub mod utils;

// re-export rand to avoid potential confusion when there's rand version mismatches
pub use rand;

// re-export k256
pub use k256;
