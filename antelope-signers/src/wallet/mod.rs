mod private_key;
pub use private_key::WalletError;

use crate::Signer;
use antelope_core::{
    k256::ecdsa::{
        signature::hazmat::RandomizedPrehashSigner, RecoveryId, Signature as K256Signature,
        SigningKey,
    },
    types::{transaction::signing_digest, Checksum256, PublicKey, Signature},
};
use async_trait::async_trait;
use private_key::encode_private_key;
use std::{collections::BTreeMap, fmt};
use tracing::trace;

/// Number of signing attempts made before giving up on finding a canonical signature
pub const MAX_SIGNING_ATTEMPTS: usize = 128;

/// A set of K1 private keys held in memory, indexed by their public keys.
///
/// Signatures are produced in the canonical form nodes require: the first attempt is the
/// deterministic RFC 6979 signature, later attempts draw a random nonce until both `r` and
/// `s` are canonical.
///
/// # Examples
///
/// ```
/// use antelope_core::{rand::thread_rng, types::Checksum256};
/// use antelope_signers::{LocalWallet, Signer};
///
/// # async fn foo() -> Result<(), Box<dyn std::error::Error>> {
/// let wallet = LocalWallet::new(&mut thread_rng());
/// let keys = wallet.public_keys();
///
/// let packed = b"packed transaction";
/// let chain_id = Checksum256::default();
/// let signatures = wallet.sign_transaction(packed, &keys, &chain_id).await?;
/// assert!(signatures[0].is_canonical());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct LocalWallet {
    pub(crate) keys: BTreeMap<PublicKey, SigningKey>,
}

#[async_trait]
impl Signer for LocalWallet {
    type Error = WalletError;

    async fn sign_transaction(
        &self,
        packed_trx: &[u8],
        required_keys: &[PublicKey],
        chain_id: &Checksum256,
    ) -> Result<Vec<Signature>, Self::Error> {
        let digest = signing_digest(chain_id, packed_trx);
        required_keys.iter().map(|key| self.sign_digest(key, &digest)).collect()
    }

    fn public_keys(&self) -> Vec<PublicKey> {
        self.keys.keys().copied().collect()
    }
}

impl LocalWallet {
    /// Signs a 32-byte digest with the private key of `key`
    pub fn sign_digest(&self, key: &PublicKey, digest: &[u8; 32]) -> Result<Signature, WalletError> {
        let signer = self.keys.get(key).ok_or(WalletError::MissingKey(*key))?;

        let (sig, recid) = signer.sign_prehash_recoverable(digest)?;
        let signature = Signature::from_parts(&sig, recid);
        if signature.is_canonical() {
            return Ok(signature)
        }

        let mut rng = rand::thread_rng();
        for attempt in 1..MAX_SIGNING_ATTEMPTS {
            trace!(%key, attempt, "retrying for a canonical signature");
            let sig: K256Signature = signer.sign_prehash_with_rng(&mut rng, digest)?;
            let recid =
                RecoveryId::trial_recovery_from_prehash(signer.verifying_key(), digest, &sig)?;
            let signature = Signature::from_parts(&sig, recid);
            if signature.is_canonical() {
                return Ok(signature)
            }
        }
        Err(WalletError::NonCanonical(MAX_SIGNING_ATTEMPTS))
    }

    /// Adds private keys, replacing any key already held for the same public key
    pub fn add_key(&mut self, keys: impl IntoIterator<Item = SigningKey>) {
        for key in keys {
            self.keys.insert(PublicKey::from(key.verifying_key()), key);
        }
    }

    /// Whether the wallet can sign with `key`
    pub fn contains(&self, key: &PublicKey) -> bool {
        self.keys.contains_key(key)
    }

    /// The private keys in `PVT_K1_…` form, ordered like [`Signer::public_keys`]
    pub fn private_keys(&self) -> Vec<String> {
        self.keys.values().map(encode_private_key).collect()
    }

    pub(crate) fn into_signing_keys(self) -> impl Iterator<Item = SigningKey> {
        self.keys.into_values()
    }
}

// do not log the private keys
impl fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalWallet").field("public_keys", &self.keys.keys()).finish()
    }
}
