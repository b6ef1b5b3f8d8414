use super::{Decoder, Encoder, Pack, PackError, Unpack};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// A 32-byte digest in its lowercase hex text form: chain ids, block ids, transaction ids
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Checksum256(pub [u8; 32]);

impl Checksum256 {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hashes `data` with SHA-256
    pub fn hash<T: AsRef<[u8]>>(data: T) -> Self {
        Self(crate::utils::sha256(data))
    }

    /// The little-endian `u32` at bytes 8..12, used as `ref_block_prefix` when the checksum
    /// is a block id
    pub fn ref_block_prefix(&self) -> u32 {
        u32::from_le_bytes([self.0[8], self.0[9], self.0[10], self.0[11]])
    }

    /// The block number encoded in the first 4 bytes (big endian) of a block id
    pub fn block_num(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }
}

impl From<[u8; 32]> for Checksum256 {
    fn from(src: [u8; 32]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Checksum256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Checksum256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Checksum256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Checksum256({self})")
    }
}

impl FromStr for Checksum256 {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut out = [0u8; 32];
        hex::decode_to_slice(s, &mut out)?;
        Ok(Self(out))
    }
}

impl Serialize for Checksum256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Checksum256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl Pack for Checksum256 {
    fn pack(&self, enc: &mut Encoder) {
        enc.write_raw(&self.0)
    }
}

impl Unpack for Checksum256 {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, PackError> {
        let mut out = [0u8; 32];
        out.copy_from_slice(dec.read_raw(32)?);
        Ok(Self(out))
    }
}
