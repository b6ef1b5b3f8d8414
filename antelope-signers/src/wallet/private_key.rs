//! Loading K1 private keys from their text forms
use super::LocalWallet;

use antelope_core::{
    k256::ecdsa::{self, SigningKey},
    rand::{CryptoRng, Rng},
    types::{KeyError, PublicKey},
    utils::{key_checksum, sha256d},
};
use std::str::FromStr;
use thiserror::Error;

/// Version byte of legacy WIF private keys
const WIF_VERSION: u8 = 0x80;

#[derive(Error, Debug)]
/// Error thrown by the Wallet module
pub enum WalletError {
    /// Error propagated from k256's ECDSA module
    #[error(transparent)]
    EcdsaError(#[from] ecdsa::Error),
    /// Error propagated from the hex crate.
    #[error(transparent)]
    HexError(#[from] hex::FromHexError),
    /// Malformed key text
    #[error(transparent)]
    KeyError(#[from] KeyError),
    /// The wallet holds no private key for a key it was asked to sign with
    #[error("no private key for {0}")]
    MissingKey(PublicKey),
    /// No canonical signature was found within the attempt limit
    #[error("no canonical signature after {0} attempts")]
    NonCanonical(usize),
}

/// Decodes a `PVT_K1_…` or legacy WIF private key into its 32 secret bytes
pub(crate) fn decode_private_key(src: &str) -> Result<Vec<u8>, WalletError> {
    if let Some(rest) = src.strip_prefix("PVT_K1_") {
        let raw = decode_base58(rest, 36)?;
        let (secret, checksum) = raw.split_at(32);
        if key_checksum(secret, Some("K1")) != checksum {
            return Err(KeyError::ChecksumMismatch.into())
        }
        return Ok(secret.to_vec())
    }
    if let Some(rest) = src.strip_prefix("PVT_") {
        let curve = rest.split('_').next().unwrap_or_default();
        return Err(KeyError::UnsupportedKeyType(curve.to_owned()).into())
    }

    // legacy WIF: version byte, secret, first 4 bytes of sha256d over both
    let raw = decode_base58(src, 37)?;
    let (payload, checksum) = raw.split_at(33);
    if payload[0] != WIF_VERSION {
        return Err(KeyError::UnknownFormat(src.to_owned()).into())
    }
    if sha256d(payload)[..4] != *checksum {
        return Err(KeyError::ChecksumMismatch.into())
    }
    Ok(payload[1..].to_vec())
}

fn decode_base58(src: &str, len: usize) -> Result<Vec<u8>, KeyError> {
    let raw = bs58::decode(src).into_vec().map_err(|e| KeyError::Base58(e.to_string()))?;
    if raw.len() != len {
        return Err(KeyError::InvalidLength { expected: len, actual: raw.len() })
    }
    Ok(raw)
}

/// Encodes a secret key in the `PVT_K1_…` form
pub(crate) fn encode_private_key(key: &SigningKey) -> String {
    let mut raw = key.to_bytes().to_vec();
    let checksum = key_checksum(&raw, Some("K1"));
    raw.extend_from_slice(&checksum);
    format!("PVT_K1_{}", bs58::encode(raw).into_string())
}

impl LocalWallet {
    /// Creates a wallet holding a single new random key seeded with the provided RNG
    pub fn new<R: Rng + CryptoRng>(rng: &mut R) -> Self {
        Self::from(SigningKey::random(rng))
    }

    /// Creates a wallet from private keys in `PVT_K1_…`, WIF or raw hex form
    pub fn from_keys<I, S>(keys: I) -> Result<Self, WalletError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut wallet = Self::default();
        for key in keys {
            wallet.add_key(key.as_ref().parse::<LocalWallet>()?.into_signing_keys());
        }
        Ok(wallet)
    }
}

impl PartialEq for LocalWallet {
    fn eq(&self, other: &Self) -> bool {
        self.keys.len() == other.keys.len() &&
            self.keys
                .iter()
                .zip(other.keys.iter())
                .all(|((a, ka), (b, kb))| a == b && ka.to_bytes() == kb.to_bytes())
    }
}

impl From<SigningKey> for LocalWallet {
    fn from(signer: SigningKey) -> Self {
        let mut wallet = Self::default();
        wallet.add_key([signer]);
        wallet
    }
}

impl FromStr for LocalWallet {
    type Err = WalletError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let secret = if src.starts_with("PVT_") || !src.chars().all(|c| c.is_ascii_hexdigit()) {
            decode_private_key(src)?
        } else {
            hex::decode(src)?
        };
        let sk = SigningKey::from_slice(&secret)?;
        Ok(sk.into())
    }
}
