//! Shared helpers for the algorithm families: base64url, constant-time
//! comparison and family dispatch guards.

use crate::algorithm::{Algorithm, Family, HashFunction};
use crate::error::{JwsError, JwsResult};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use subtle::ConstantTimeEq;

/// Base64 URL-safe encoding without padding (RFC 7515 §2)
#[inline]
#[must_use]
pub fn base64_url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Base64 URL-safe decoding without padding (RFC 7515 §2)
///
/// # Errors
/// Returns the decoder error for characters outside the URL-safe alphabet,
/// padding, or an impossible trailing length.
#[inline]
pub fn base64_url_decode(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(input)
}

/// Constant-time equality; slices of different length compare unequal
#[inline]
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// Ensure `alg` belongs to `family` and return its hash function.
pub(crate) fn require_family(alg: Algorithm, family: Family) -> JwsResult<HashFunction> {
    let row = alg.descriptor()?;
    if row.family != family {
        return Err(JwsError::InvalidAlgorithm(format!(
            "{} is not a {family:?} algorithm",
            row.name
        )));
    }
    Ok(row.hash)
}
