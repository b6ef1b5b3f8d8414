//! Conversion between JSON ABI descriptions and the binary `abi_def` encoding.
//!
//! The system contract's `setabi` action takes the ABI in its packed binary form, while
//! contract toolchains emit JSON. [`encode_abi`] validates a JSON description and packs it,
//! [`decode_abi`] is its inverse.
//!
//! ```
//! use antelope_core::abi::{decode_abi, encode_abi, AbiDef};
//!
//! let json = r#"{"version": "eosio::abi/1.1", "structs": [], "actions": [], "tables": []}"#;
//! let bin = encode_abi(json).unwrap();
//! assert_eq!(decode_abi(&bin).unwrap(), serde_json::from_str::<AbiDef>(json).unwrap());
//! ```
use crate::types::{Pack, Unpack};

mod error;
pub use error::{AbiError, Result};

mod raw;
pub use raw::{
    AbiDef, ActionDef, ActionResultDef, ClausePair, ErrorMessage, FieldDef, StructDef, TableDef,
    TypeDef, VariantDef,
};

/// Prefix shared by every supported ABI version string
pub const ABI_VERSION_PREFIX: &str = "eosio::abi/1.";

impl AbiDef {
    /// Parses and validates a JSON ABI description
    pub fn from_json(json: &str) -> Result<Self> {
        let abi: Self = serde_json::from_str(json)?;
        abi.validate()?;
        Ok(abi)
    }

    /// Checks the version string
    pub fn validate(&self) -> Result<()> {
        if !self.version.starts_with(ABI_VERSION_PREFIX) {
            return Err(AbiError::UnsupportedVersion(self.version.clone()))
        }
        Ok(())
    }

    /// Whether `other` describes the same ABI. An absent binary extension equals an empty one,
    /// as nodes report both forms.
    pub fn same_as(&self, other: &AbiDef) -> bool {
        self.normalized() == other.normalized()
    }

    fn normalized(&self) -> Self {
        let mut abi = self.clone();
        if abi.variants.as_ref().map_or(false, Vec::is_empty) {
            abi.variants = None;
        }
        if abi.action_results.as_ref().map_or(false, Vec::is_empty) {
            abi.action_results = None;
        }
        abi
    }

    /// Looks up the struct type of an action
    pub fn action_type(&self, action: &str) -> Option<&str> {
        self.actions.iter().find(|a| a.name.to_string() == action).map(|a| a.ty.as_str())
    }
}

/// Converts a JSON ABI description to its binary encoding
pub fn encode_abi(json: &str) -> Result<Vec<u8>> {
    Ok(AbiDef::from_json(json)?.packed())
}

/// Decodes a binary ABI, the inverse of [`encode_abi`]
pub fn decode_abi(bin: &[u8]) -> Result<AbiDef> {
    let abi = AbiDef::unpacked(bin)?;
    abi.validate()?;
    Ok(abi)
}
