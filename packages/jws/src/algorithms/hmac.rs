//! HMAC-SHA family (HS256, HS384, HS512)
//!
//! The MAC is computed over the signing input directly; the tag is the
//! signature with no further encoding.

use super::utils::{constant_time_eq, require_family};
use crate::algorithm::{Algorithm, Family, HashFunction};
use crate::error::{JwsError, JwsResult};
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// Compute the MAC of `message` under `secret`.
///
/// # Errors
/// `InvalidAlgorithm` if `alg` is not an HMAC algorithm, `InvalidKey` if the
/// secret is empty.
pub fn sign(alg: Algorithm, secret: &[u8], message: &[u8]) -> JwsResult<Vec<u8>> {
    let hash = require_family(alg, Family::Mac)?;
    if secret.is_empty() {
        return Err(JwsError::invalid_key("HMAC secret is empty"));
    }
    if secret.len() < hash.output_len() {
        tracing::warn!(
            alg = alg.name(),
            secret_len = secret.len(),
            "HMAC secret is shorter than the hash output"
        );
    }
    mac(hash, secret, message)
}

/// Recompute the MAC and compare it with `signature` in constant time.
///
/// # Errors
/// The errors of [`sign`], and `AlteredMessage` when the tags differ.
pub fn verify(alg: Algorithm, secret: &[u8], message: &[u8], signature: &[u8]) -> JwsResult<()> {
    let expected = sign(alg, secret, message)?;
    if constant_time_eq(&expected, signature) {
        Ok(())
    } else {
        Err(JwsError::AlteredMessage)
    }
}

fn mac(hash: HashFunction, secret: &[u8], message: &[u8]) -> JwsResult<Vec<u8>> {
    let tag = match hash {
        HashFunction::Sha256 => {
            let mut mac = HmacSha256::new_from_slice(secret).map_err(|_| invalid_secret())?;
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
        HashFunction::Sha384 => {
            let mut mac = HmacSha384::new_from_slice(secret).map_err(|_| invalid_secret())?;
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
        HashFunction::Sha512 => {
            let mut mac = HmacSha512::new_from_slice(secret).map_err(|_| invalid_secret())?;
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
    };
    Ok(tag)
}

#[inline]
fn invalid_secret() -> JwsError {
    JwsError::invalid_key("Invalid HMAC key")
}
