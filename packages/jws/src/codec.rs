//! Fixed-width ECDSA signature codec (RFC 7518 §3.4)
//!
//! An ECDSA signature is the pair `(r, s)`. On the wire it is the
//! concatenation of both integers, each big-endian and left-padded with zero
//! bytes to the curve's slot width: 32 bytes for P-256, 48 for P-384 and 66
//! for P-521. Decoding splits exactly at the midpoint and reads each slot as
//! a big-endian integer; no bytes are stripped from either end.

use crate::algorithm::Algorithm;
use crate::error::{JwsError, JwsResult};

/// Arbitrary-precision unsigned integer in big-endian form.
///
/// The magnitude is kept without leading zero bytes so equality is numeric
/// equality. Zero has an empty magnitude and is still a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UnsignedInt(Vec<u8>);

impl UnsignedInt {
    /// The integer zero
    #[must_use]
    pub fn zero() -> Self {
        Self(Vec::new())
    }

    /// Read a big-endian magnitude; leading zero bytes are insignificant
    #[must_use]
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
        Self(bytes[first..].to_vec())
    }

    /// Minimal big-endian magnitude (empty for zero)
    #[must_use]
    pub fn as_be_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Whether the value is zero
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of bytes in the minimal magnitude
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.0.len()
    }

    /// Big-endian bytes left-padded with zeros to exactly `width` bytes,
    /// or `None` if the value does not fit.
    #[must_use]
    pub fn to_fixed_be(&self, width: usize) -> Option<Vec<u8>> {
        if self.0.len() > width {
            return None;
        }
        let mut out = vec![0u8; width];
        out[width - self.0.len()..].copy_from_slice(&self.0);
        Some(out)
    }
}

/// The two integers of an ECDSA signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignaturePair {
    /// The `r` component
    pub r: UnsignedInt,
    /// The `s` component
    pub s: UnsignedInt,
}

impl SignaturePair {
    /// Pair the two components
    #[must_use]
    pub fn new(r: UnsignedInt, s: UnsignedInt) -> Self {
        Self { r, s }
    }
}

/// Encode `(r, s)` as the fixed-width `r || s` byte string for `alg`.
///
/// # Errors
/// Returns `InvalidAlgorithm` if `alg` is not an ECDSA algorithm, and
/// `Internal` if either integer is wider than the slot. The latter means the
/// signing primitive broke its contract; it is never caused by caller input.
pub fn encode_signature(alg: Algorithm, pair: &SignaturePair) -> JwsResult<Vec<u8>> {
    let width = alg.ecdsa_curve()?.slot_width();

    let r = fixed_slot(alg, "r", &pair.r, width)?;
    let s = fixed_slot(alg, "s", &pair.s, width)?;

    let mut out = Vec::with_capacity(width * 2);
    out.extend_from_slice(&r);
    out.extend_from_slice(&s);
    Ok(out)
}

/// Decode a fixed-width `r || s` byte string for `alg`.
///
/// # Errors
/// Returns `InvalidAlgorithm` if `alg` is not an ECDSA algorithm and
/// `InvalidSignatureLength` if `bytes` is not exactly the algorithm's
/// signature length (an empty input included).
pub fn decode_signature(alg: Algorithm, bytes: &[u8]) -> JwsResult<SignaturePair> {
    let curve = alg.ecdsa_curve()?;
    let expected = curve.signature_len();

    if bytes.len() != expected {
        return Err(JwsError::InvalidSignatureLength {
            algorithm: alg.name().to_string(),
            expected,
            actual: bytes.len(),
        });
    }

    let (r, s) = bytes.split_at(curve.slot_width());
    Ok(SignaturePair::new(
        UnsignedInt::from_be_bytes(r),
        UnsignedInt::from_be_bytes(s),
    ))
}

fn fixed_slot(
    alg: Algorithm,
    component: &str,
    value: &UnsignedInt,
    width: usize,
) -> JwsResult<Vec<u8>> {
    value.to_fixed_be(width).ok_or_else(|| {
        tracing::error!(
            alg = alg.name(),
            component,
            len = value.byte_len(),
            width,
            "ECDSA primitive returned an integer wider than the signature slot"
        );
        JwsError::Internal(format!(
            "{component} is {} bytes, {} slot is {width}",
            value.byte_len(),
            alg.name()
        ))
    })
}
