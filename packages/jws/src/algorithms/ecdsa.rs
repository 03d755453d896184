//! ECDSA family (ES256, ES384, ES512)
//!
//! Every operation checks the key's curve against the curve the algorithm
//! names before touching the primitive. Signatures leave this module in the
//! fixed-width `r || s` form produced by [`crate::codec`].

use super::utils::require_family;
use crate::algorithm::{Algorithm, Curve, Family};
use crate::codec::{self, SignaturePair, UnsignedInt};
use crate::error::{JwsError, JwsResult};
use crate::keys::{EcPrivateKey, EcPublicKey};
use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};

/// Hash `message`, sign the digest and encode `(r, s)`.
///
/// # Errors
/// `InvalidAlgorithm` if `alg` is not ECDSA, `InvalidCurve` if the key is on
/// a different curve than `alg` requires.
pub fn sign(alg: Algorithm, key: &EcPrivateKey, message: &[u8]) -> JwsResult<Vec<u8>> {
    let hash = require_family(alg, Family::Ecdsa)?;
    require_curve(alg, key.curve())?;

    let digest = hash.digest(message);
    let pair = sign_digest(key, &digest)?;
    codec::encode_signature(alg, &pair)
}

/// Decode `signature`, hash `message` and verify.
///
/// # Errors
/// `InvalidAlgorithm` if `alg` is not ECDSA, `InvalidCurve` on a curve
/// mismatch, `InvalidSignatureLength` for a wrongly sized signature and
/// `AlteredMessage` when the signature does not verify.
pub fn verify(
    alg: Algorithm,
    key: &EcPublicKey,
    message: &[u8],
    signature: &[u8],
) -> JwsResult<()> {
    let hash = require_family(alg, Family::Ecdsa)?;
    require_curve(alg, key.curve())?;

    let pair = codec::decode_signature(alg, signature)?;
    let digest = hash.digest(message);
    if verify_digest(key, &digest, &pair) {
        Ok(())
    } else {
        Err(JwsError::AlteredMessage)
    }
}

/// Sign a precomputed digest. Nonces are derived per RFC 6979.
///
/// # Errors
/// `InvalidKey` if the primitive rejects the digest.
pub fn sign_digest(key: &EcPrivateKey, digest: &[u8]) -> JwsResult<SignaturePair> {
    let failed =
        |e: p256::ecdsa::Error| JwsError::InvalidKey(format!("ECDSA signing failed: {e}"));

    let pair = match key {
        EcPrivateKey::P256(k) => {
            let sig: p256::ecdsa::Signature = k.sign_prehash(digest).map_err(failed)?;
            let (r, s) = sig.split_bytes();
            pair_from(&r, &s)
        }
        EcPrivateKey::P384(k) => {
            let sig: p384::ecdsa::Signature = k.sign_prehash(digest).map_err(failed)?;
            let (r, s) = sig.split_bytes();
            pair_from(&r, &s)
        }
        EcPrivateKey::P521(k) => {
            let sig: p521::ecdsa::Signature = k.sign_prehash(digest).map_err(failed)?;
            let (r, s) = sig.split_bytes();
            pair_from(&r, &s)
        }
    };
    Ok(pair)
}

fn pair_from(r: &[u8], s: &[u8]) -> SignaturePair {
    SignaturePair::new(UnsignedInt::from_be_bytes(r), UnsignedInt::from_be_bytes(s))
}

/// Verify `(r, s)` over a precomputed digest.
///
/// Scalars that are zero or not below the group order never verify.
#[must_use]
pub fn verify_digest(key: &EcPublicKey, digest: &[u8], pair: &SignaturePair) -> bool {
    let width = key.curve().slot_width();
    let (Some(r), Some(s)) = (pair.r.to_fixed_be(width), pair.s.to_fixed_be(width)) else {
        return false;
    };
    let bytes = [r, s].concat();

    match key {
        EcPublicKey::P256(k) => p256::ecdsa::Signature::from_slice(&bytes)
            .is_ok_and(|sig| k.verify_prehash(digest, &sig).is_ok()),
        EcPublicKey::P384(k) => p384::ecdsa::Signature::from_slice(&bytes)
            .is_ok_and(|sig| k.verify_prehash(digest, &sig).is_ok()),
        EcPublicKey::P521(k) => p521::ecdsa::Signature::from_slice(&bytes)
            .is_ok_and(|sig| k.verify_prehash(digest, &sig).is_ok()),
    }
}

fn require_curve(alg: Algorithm, found: Curve) -> JwsResult<()> {
    let expected = alg.ecdsa_curve()?;
    if expected != found {
        tracing::warn!(
            alg = alg.name(),
            expected = expected.name(),
            found = found.name(),
            "ECDSA key curve does not match algorithm"
        );
        return Err(JwsError::invalid_curve(expected, found));
    }
    Ok(())
}
