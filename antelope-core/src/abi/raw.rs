//! The `abi_def` structure in its JSON and binary forms
use crate::types::{impl_pack_struct, Bytes, Decoder, Encoder, Name, Pack, PackError, Unpack};
use serde::{Deserialize, Serialize};

/// A contract's ABI description
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiDef {
    pub version: String,
    #[serde(default)]
    pub types: Vec<TypeDef>,
    #[serde(default)]
    pub structs: Vec<StructDef>,
    #[serde(default)]
    pub actions: Vec<ActionDef>,
    #[serde(default)]
    pub tables: Vec<TableDef>,
    #[serde(default)]
    pub ricardian_clauses: Vec<ClausePair>,
    #[serde(default)]
    pub error_messages: Vec<ErrorMessage>,
    #[serde(default)]
    pub abi_extensions: Vec<(u16, Bytes)>,
    /// Added in `eosio::abi/1.1`, only written when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<VariantDef>>,
    /// Added in `eosio::abi/1.2`, only written when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_results: Option<Vec<ActionResultDef>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    pub new_type_name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDef {
    pub name: String,
    #[serde(default)]
    pub base: String,
    pub fields: Vec<FieldDef>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDef {
    pub name: Name,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub ricardian_contract: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDef {
    pub name: Name,
    #[serde(default)]
    pub index_type: String,
    #[serde(default)]
    pub key_names: Vec<String>,
    #[serde(default)]
    pub key_types: Vec<String>,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClausePair {
    pub id: String,
    pub body: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub error_code: u64,
    pub error_msg: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDef {
    pub name: String,
    pub types: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResultDef {
    pub name: Name,
    pub result_type: String,
}

impl_pack_struct!(TypeDef { new_type_name, ty });
impl_pack_struct!(FieldDef { name, ty });
impl_pack_struct!(StructDef { name, base, fields });
impl_pack_struct!(ActionDef { name, ty, ricardian_contract });
impl_pack_struct!(TableDef { name, index_type, key_names, key_types, ty });
impl_pack_struct!(ClausePair { id, body });
impl_pack_struct!(ErrorMessage { error_code, error_msg });
impl_pack_struct!(VariantDef { name, types });
impl_pack_struct!(ActionResultDef { name, result_type });

impl Pack for AbiDef {
    fn pack(&self, enc: &mut Encoder) {
        self.version.pack(enc);
        self.types.pack(enc);
        self.structs.pack(enc);
        self.actions.pack(enc);
        self.tables.pack(enc);
        self.ricardian_clauses.pack(enc);
        self.error_messages.pack(enc);
        self.abi_extensions.pack(enc);
        // binary extensions: a later one can only be written after all earlier ones
        if let Some(results) = &self.action_results {
            match &self.variants {
                Some(variants) => variants.pack(enc),
                None => enc.write_varuint32(0),
            }
            results.pack(enc);
        } else if let Some(variants) = &self.variants {
            variants.pack(enc);
        }
    }
}

impl Unpack for AbiDef {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, PackError> {
        let mut abi = Self {
            version: Unpack::unpack(dec)?,
            types: Unpack::unpack(dec)?,
            structs: Unpack::unpack(dec)?,
            actions: Unpack::unpack(dec)?,
            tables: Unpack::unpack(dec)?,
            ricardian_clauses: Unpack::unpack(dec)?,
            error_messages: Unpack::unpack(dec)?,
            abi_extensions: Unpack::unpack(dec)?,
            variants: None,
            action_results: None,
        };
        if dec.remaining() > 0 {
            abi.variants = Some(Unpack::unpack(dec)?);
        }
        if dec.remaining() > 0 {
            abi.action_results = Some(Unpack::unpack(dec)?);
        }
        Ok(abi)
    }
}
