use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// The default URL a local `nodeos` instance serves its HTTP API on
pub const DEFAULT_NODE_URL: &str = "http://127.0.0.1:8888";

/// Hash a message according to SHA-256
pub fn sha256<T: AsRef<[u8]>>(bytes: T) -> [u8; 32] {
    Sha256::digest(bytes.as_ref()).into()
}

/// Double SHA-256, used by the legacy WIF private key checksum
pub fn sha256d<T: AsRef<[u8]>>(bytes: T) -> [u8; 32] {
    sha256(sha256(bytes))
}

/// Hash a message according to RIPEMD-160
pub fn ripemd160<T: AsRef<[u8]>>(bytes: T) -> [u8; 20] {
    Ripemd160::digest(bytes.as_ref()).into()
}

/// Computes the 4-byte checksum appended to base58 encoded keys and signatures.
///
/// Legacy (`EOS…`) public keys are checksummed without a suffix, while the `PUB_K1_`,
/// `PVT_K1_` and `SIG_K1_` forms append the curve name before hashing.
pub fn key_checksum(data: &[u8], suffix: Option<&str>) -> [u8; 4] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    if let Some(suffix) = suffix {
        hasher.update(suffix.as_bytes());
    }
    let digest = hasher.finalize();
    let mut checksum = [0u8; 4];
    checksum.copy_from_slice(&digest[..4]);
    checksum
}

/// Encodes bytes as a lowercase hex string without any prefix
pub fn to_hex<T: AsRef<[u8]>>(bytes: T) -> String {
    hex::encode(bytes.as_ref())
}
