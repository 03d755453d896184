//! JWS error types

use crate::algorithm::Curve;

/// JWS operation result type
pub type JwsResult<T> = Result<T, JwsError>;

/// JWS error types
///
/// Caller-input failures (bad key, bad curve, unknown algorithm, tampered
/// content) are ordinary values. `Internal` is the only variant that signals
/// a broken invariant inside the crate rather than bad input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JwsError {
    /// Unknown algorithm, or one that belongs to the wrong family for the operation
    #[error("invalid algorithm: {0}")]
    InvalidAlgorithm(String),

    /// Key blob unparsable, absent, or of the wrong family for the declared algorithm
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// ECDSA key curve does not match the curve required by the algorithm
    #[error("invalid curve: algorithm requires {expected}, key is on {found}")]
    InvalidCurve {
        /// Curve named by the algorithm
        expected: Curve,
        /// Curve the key was actually generated on
        found: Curve,
    },

    /// Well-formed signature that does not verify (wrong key or altered content)
    #[error("altered message on verification")]
    AlteredMessage,

    /// No signature entry matches the requested key id
    #[error("signature not found for kid {0:?}")]
    SignatureNotFound(String),

    /// Signature entry header is missing or carries no `alg`
    #[error("signature header not found or missing alg")]
    HeaderNotFound,

    /// Signature bytes have the wrong total length for the algorithm
    #[error("invalid signature length for {algorithm}: expected {expected} bytes, got {actual}")]
    InvalidSignatureLength {
        /// Algorithm the signature was decoded for
        algorithm: String,
        /// Fixed length required by the algorithm
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// Signature field is not valid base64url
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    /// Compact token does not have the `header.payload.signature` shape
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// JSON encoding or decoding failed
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal invariant violated
    #[error("internal error: {0}")]
    Internal(String),
}

impl JwsError {
    /// Create an invalid algorithm error
    #[inline]
    #[must_use]
    pub fn invalid_algorithm(msg: &str) -> Self {
        JwsError::InvalidAlgorithm(msg.to_string())
    }

    /// Create an invalid key error
    #[inline]
    #[must_use]
    pub fn invalid_key(msg: &str) -> Self {
        JwsError::InvalidKey(msg.to_string())
    }

    /// Create an invalid curve error
    #[inline]
    #[must_use]
    pub fn invalid_curve(expected: Curve, found: Curve) -> Self {
        JwsError::InvalidCurve { expected, found }
    }

    /// Create a signature not found error
    #[inline]
    #[must_use]
    pub fn signature_not_found(kid: &str) -> Self {
        JwsError::SignatureNotFound(kid.to_string())
    }

    /// Create a malformed signature error
    #[inline]
    #[must_use]
    pub fn malformed_signature(msg: &str) -> Self {
        JwsError::MalformedSignature(msg.to_string())
    }

    /// Create a malformed token error
    #[inline]
    #[must_use]
    pub fn malformed_token(msg: &str) -> Self {
        JwsError::MalformedToken(msg.to_string())
    }

    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(msg: &str) -> Self {
        JwsError::Serialization(msg.to_string())
    }

    /// Create an internal error
    #[inline]
    #[must_use]
    pub fn internal(msg: &str) -> Self {
        JwsError::Internal(msg.to_string())
    }

    /// True for the structural decode errors that indicate transport
    /// corruption rather than a forgery attempt.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            JwsError::HeaderNotFound
                | JwsError::InvalidSignatureLength { .. }
                | JwsError::MalformedSignature(_)
                | JwsError::MalformedToken(_)
        )
    }
}

impl From<serde_json::Error> for JwsError {
    fn from(err: serde_json::Error) -> Self {
        JwsError::Serialization(err.to_string())
    }
}
