use super::{Decoder, Encoder, Pack, PackError, Unpack};
use crate::utils::key_checksum;
use k256::ecdsa::{RecoveryId, Signature as K256Signature, VerifyingKey};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Prefix of the legacy public key text form
pub const LEGACY_PUBLIC_KEY_PREFIX: &str = "EOS";

/// Error thrown when parsing keys or signatures
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("unrecognized key format `{0}`")]
    UnknownFormat(String),
    #[error("unsupported key type `{0}`: only K1 keys are supported")]
    UnsupportedKeyType(String),
    #[error("invalid base58 encoding: {0}")]
    Base58(String),
    #[error("invalid length {actual}, expected {expected}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("checksum mismatch")]
    ChecksumMismatch,
    #[error("invalid secp256k1 point or signature: {0}")]
    Curve(String),
}

/// The curve a key or signature belongs to. Its discriminant is the type byte of the binary form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum KeyType {
    #[default]
    K1 = 0,
}

impl KeyType {
    fn suffix(&self) -> &'static str {
        match self {
            KeyType::K1 => "K1",
        }
    }
}

/// Decodes `base58(payload || checksum)` and verifies the checksum
pub(crate) fn decode_checked(
    encoded: &str,
    len: usize,
    suffix: Option<&str>,
) -> Result<Vec<u8>, KeyError> {
    let raw = bs58::decode(encoded).into_vec().map_err(|e| KeyError::Base58(e.to_string()))?;
    if raw.len() != len + 4 {
        return Err(KeyError::InvalidLength { expected: len + 4, actual: raw.len() })
    }
    let (payload, checksum) = raw.split_at(len);
    if key_checksum(payload, suffix) != checksum {
        return Err(KeyError::ChecksumMismatch)
    }
    Ok(payload.to_vec())
}

/// Encodes `base58(payload || checksum)`
pub(crate) fn encode_checked(payload: &[u8], suffix: Option<&str>) -> String {
    let mut raw = payload.to_vec();
    raw.extend_from_slice(&key_checksum(payload, suffix));
    bs58::encode(raw).into_string()
}

/// A compressed secp256k1 public key.
///
/// Parses both the legacy `EOS…` and the `PUB_K1_…` text forms and displays the latter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey {
    key_type: KeyType,
    data: [u8; 33],
}

impl PublicKey {
    /// Creates a key from its 33-byte compressed SEC1 encoding
    pub fn from_compressed(data: [u8; 33]) -> Result<Self, KeyError> {
        VerifyingKey::from_sec1_bytes(&data).map_err(|e| KeyError::Curve(e.to_string()))?;
        Ok(Self { key_type: KeyType::K1, data })
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// The 33-byte compressed point
    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.data
    }

    /// Converts the key into a k256 verifying key
    pub fn to_verifying_key(&self) -> Result<VerifyingKey, KeyError> {
        VerifyingKey::from_sec1_bytes(&self.data).map_err(|e| KeyError::Curve(e.to_string()))
    }

    /// The legacy `EOS…` text form
    pub fn to_legacy_string(&self) -> String {
        format!("{LEGACY_PUBLIC_KEY_PREFIX}{}", encode_checked(&self.data, None))
    }
}

impl From<&VerifyingKey> for PublicKey {
    fn from(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(true);
        let mut data = [0u8; 33];
        data.copy_from_slice(point.as_bytes());
        Self { key_type: KeyType::K1, data }
    }
}

impl FromStr for PublicKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let payload = if let Some(rest) = s.strip_prefix("PUB_K1_") {
            decode_checked(rest, 33, Some(KeyType::K1.suffix()))?
        } else if let Some(rest) = s.strip_prefix("PUB_") {
            let curve = rest.split('_').next().unwrap_or_default();
            return Err(KeyError::UnsupportedKeyType(curve.to_owned()))
        } else if let Some(rest) = s.strip_prefix(LEGACY_PUBLIC_KEY_PREFIX) {
            decode_checked(rest, 33, None)?
        } else {
            return Err(KeyError::UnknownFormat(s.to_owned()))
        };
        let mut data = [0u8; 33];
        data.copy_from_slice(&payload);
        PublicKey::from_compressed(data)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = self.key_type.suffix();
        write!(f, "PUB_{suffix}_{}", encode_checked(&self.data, Some(suffix)))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({self})")
    }
}

/// A recoverable secp256k1 signature: recovery byte followed by `r` and `s`.
///
/// The text form is `SIG_K1_…`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    key_type: KeyType,
    data: [u8; 65],
}

impl Signature {
    /// Builds the compact recoverable form from a k256 signature and its recovery id
    pub fn from_parts(signature: &K256Signature, recovery_id: RecoveryId) -> Self {
        let mut data = [0u8; 65];
        // 27 + 4 marks a compressed public key
        data[0] = 27 + 4 + recovery_id.to_byte();
        data[1..].copy_from_slice(&signature.to_bytes());
        Self { key_type: KeyType::K1, data }
    }

    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.data
    }

    /// Whether the signature satisfies the legacy canonical form older nodes insist on:
    /// neither `r` nor `s` has its high bit set or a redundant leading zero byte.
    pub fn is_canonical(&self) -> bool {
        let d = &self.data;
        (d[1] & 0x80) == 0 &&
            !(d[1] == 0 && (d[2] & 0x80) == 0) &&
            (d[33] & 0x80) == 0 &&
            !(d[33] == 0 && (d[34] & 0x80) == 0)
    }

    /// Recovers the public key that produced this signature over `digest`
    pub fn recover(&self, digest: &[u8; 32]) -> Result<PublicKey, KeyError> {
        let recovery_byte = self.data[0].wrapping_sub(27) & 3;
        let recovery_id = RecoveryId::from_byte(recovery_byte)
            .ok_or_else(|| KeyError::Curve(format!("invalid recovery byte {}", self.data[0])))?;
        let signature = K256Signature::from_slice(&self.data[1..])
            .map_err(|e| KeyError::Curve(e.to_string()))?;
        let key = VerifyingKey::recover_from_prehash(digest, &signature, recovery_id)
            .map_err(|e| KeyError::Curve(e.to_string()))?;
        Ok(PublicKey::from(&key))
    }
}

impl FromStr for Signature {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = match s.strip_prefix("SIG_K1_") {
            Some(rest) => rest,
            None if s.starts_with("SIG_") => {
                let curve = s[4..].split('_').next().unwrap_or_default();
                return Err(KeyError::UnsupportedKeyType(curve.to_owned()))
            }
            None => return Err(KeyError::UnknownFormat(s.to_owned())),
        };
        let payload = decode_checked(rest, 65, Some(KeyType::K1.suffix()))?;
        let mut data = [0u8; 65];
        data.copy_from_slice(&payload);
        Ok(Self { key_type: KeyType::K1, data })
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = self.key_type.suffix();
        write!(f, "SIG_{suffix}_{}", encode_checked(&self.data, Some(suffix)))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({self})")
    }
}

macro_rules! impl_string_serde {
    ($($ty:ty),*) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let s = String::deserialize(deserializer)?;
                    s.parse().map_err(de::Error::custom)
                }
            }
        )*
    };
}

impl_string_serde!(PublicKey, Signature);

impl Pack for PublicKey {
    fn pack(&self, enc: &mut Encoder) {
        (self.key_type as u8).pack(enc);
        enc.write_raw(&self.data);
    }
}

impl Unpack for PublicKey {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, PackError> {
        // only K1 is representable; other curves are left to the node
        let _key_type = u8::unpack(dec)?;
        let mut data = [0u8; 33];
        data.copy_from_slice(dec.read_raw(33)?);
        Ok(Self { key_type: KeyType::K1, data })
    }
}

impl Pack for Signature {
    fn pack(&self, enc: &mut Encoder) {
        (self.key_type as u8).pack(enc);
        enc.write_raw(&self.data);
    }
}
