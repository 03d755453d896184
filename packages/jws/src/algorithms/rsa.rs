//! RSASSA-PKCS1-v1_5 family (RS256, RS384, RS512)

use super::utils::require_family;
use crate::algorithm::{Algorithm, Family, HashFunction};
use crate::error::{JwsError, JwsResult};
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::{Sha256, Sha384, Sha512};

/// Hash `message` and sign the digest with PKCS#1 v1.5 padding.
///
/// # Errors
/// `InvalidAlgorithm` if `alg` is not an RSA algorithm, `InvalidKey` if the
/// modulus is too small for the padded digest.
pub fn sign(alg: Algorithm, key: &RsaPrivateKey, message: &[u8]) -> JwsResult<Vec<u8>> {
    let hash = require_family(alg, Family::Rsa)?;
    let digest = hash.digest(message);
    key.sign(scheme(hash), &digest)
        .map_err(|e| JwsError::InvalidKey(format!("RSA signing failed: {e}")))
}

/// Hash `message` and check `signature` against it.
///
/// # Errors
/// `InvalidAlgorithm` if `alg` is not an RSA algorithm, `AlteredMessage`
/// when the signature does not verify under `key`.
pub fn verify(
    alg: Algorithm,
    key: &RsaPublicKey,
    message: &[u8],
    signature: &[u8],
) -> JwsResult<()> {
    let hash = require_family(alg, Family::Rsa)?;
    let digest = hash.digest(message);
    key.verify(scheme(hash), &digest, signature)
        .map_err(|_| JwsError::AlteredMessage)
}

fn scheme(hash: HashFunction) -> Pkcs1v15Sign {
    match hash {
        HashFunction::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
        HashFunction::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
        HashFunction::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
    }
}
