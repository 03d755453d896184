//! Parsed key material
//!
//! Key blobs are parsed according to the family of the declared algorithm,
//! never according to metadata inside the blob. A blob that does not parse
//! as the declared family is rejected with `InvalidKey`.
//!
//! Accepted encodings:
//!
//! | Family | Private                          | Public                 |
//! |--------|----------------------------------|------------------------|
//! | MAC    | raw secret bytes                 | raw secret bytes       |
//! | RSA    | PKCS#1 DER (PKCS#8 DER accepted) | PKCS#1 DER (SPKI DER accepted) |
//! | ECDSA  | SEC1 DER (PKCS#8 DER accepted)   | SPKI DER               |

use crate::algorithm::{Algorithm, Curve, Family};
use crate::error::{JwsError, JwsResult};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fmt;
use zeroize::Zeroizing;

/// Shared HMAC secret, wiped on drop
#[derive(Clone)]
pub struct HmacSecret(Zeroizing<Vec<u8>>);

impl HmacSecret {
    /// Wrap raw secret bytes.
    ///
    /// # Errors
    /// Returns `InvalidKey` if the secret is empty.
    pub fn new(secret: &[u8]) -> JwsResult<Self> {
        if secret.is_empty() {
            return Err(JwsError::invalid_key("HMAC secret is empty"));
        }
        Ok(Self(Zeroizing::new(secret.to_vec())))
    }

    /// Raw secret bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for HmacSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacSecret")
            .field("len", &self.0.len())
            .finish()
    }
}

/// ECDSA signing key on one of the supported curves
pub enum EcPrivateKey {
    /// P-256 key
    P256(p256::ecdsa::SigningKey),
    /// P-384 key
    P384(p384::ecdsa::SigningKey),
    /// P-521 key
    P521(p521::ecdsa::SigningKey),
}

/// ECDSA verifying key on one of the supported curves
pub enum EcPublicKey {
    /// P-256 key
    P256(p256::ecdsa::VerifyingKey),
    /// P-384 key
    P384(p384::ecdsa::VerifyingKey),
    /// P-521 key
    P521(p521::ecdsa::VerifyingKey),
}

impl EcPrivateKey {
    /// Curve the key was generated on
    #[must_use]
    pub fn curve(&self) -> Curve {
        match self {
            EcPrivateKey::P256(_) => Curve::P256,
            EcPrivateKey::P384(_) => Curve::P384,
            EcPrivateKey::P521(_) => Curve::P521,
        }
    }

    /// Parse an EC private key. The curve is whatever the blob encodes.
    ///
    /// # Errors
    /// Returns `InvalidKey` if the blob is not a P-256, P-384 or P-521 key.
    pub fn from_der(der: &[u8]) -> JwsResult<Self> {
        // PKCS#8 carries the curve OID and is checked against it.
        if let Ok(secret) = p256::SecretKey::from_pkcs8_der(der) {
            return Self::p256(&secret);
        }
        if let Ok(secret) = p384::SecretKey::from_pkcs8_der(der) {
            return Self::p384(&secret);
        }
        if let Ok(secret) = p521::SecretKey::from_pkcs8_der(der) {
            return Self::p521(&secret);
        }

        // SEC1 scalars are fixed width per curve; try the narrowest first.
        if let Ok(secret) = p256::SecretKey::from_sec1_der(der) {
            return Self::p256(&secret);
        }
        if let Ok(secret) = p384::SecretKey::from_sec1_der(der) {
            return Self::p384(&secret);
        }
        if let Ok(secret) = p521::SecretKey::from_sec1_der(der) {
            return Self::p521(&secret);
        }

        Err(JwsError::invalid_key(
            "Invalid EC private key: expected SEC1 or PKCS#8 DER on P-256, P-384 or P-521",
        ))
    }

    fn p256(secret: &p256::SecretKey) -> JwsResult<Self> {
        p256::ecdsa::SigningKey::from_bytes(&secret.to_bytes())
            .map(EcPrivateKey::P256)
            .map_err(|e| JwsError::InvalidKey(format!("Invalid P-256 private key: {e}")))
    }

    fn p384(secret: &p384::SecretKey) -> JwsResult<Self> {
        p384::ecdsa::SigningKey::from_bytes(&secret.to_bytes())
            .map(EcPrivateKey::P384)
            .map_err(|e| JwsError::InvalidKey(format!("Invalid P-384 private key: {e}")))
    }

    fn p521(secret: &p521::SecretKey) -> JwsResult<Self> {
        p521::ecdsa::SigningKey::from_bytes(&secret.to_bytes())
            .map(EcPrivateKey::P521)
            .map_err(|e| JwsError::InvalidKey(format!("Invalid P-521 private key: {e}")))
    }
}

impl EcPublicKey {
    /// Curve the key lies on
    #[must_use]
    pub fn curve(&self) -> Curve {
        match self {
            EcPublicKey::P256(_) => Curve::P256,
            EcPublicKey::P384(_) => Curve::P384,
            EcPublicKey::P521(_) => Curve::P521,
        }
    }

    /// Parse an SPKI EC public key. The curve comes from the SPKI curve OID.
    ///
    /// # Errors
    /// Returns `InvalidKey` if the blob is not a P-256, P-384 or P-521 key.
    pub fn from_der(der: &[u8]) -> JwsResult<Self> {
        if let Ok(public) = p256::PublicKey::from_public_key_der(der) {
            let point = public.to_encoded_point(false);
            return p256::ecdsa::VerifyingKey::from_sec1_bytes(point.as_bytes())
                .map(EcPublicKey::P256)
                .map_err(|e| JwsError::InvalidKey(format!("Invalid P-256 public key: {e}")));
        }
        if let Ok(public) = p384::PublicKey::from_public_key_der(der) {
            let point = public.to_encoded_point(false);
            return p384::ecdsa::VerifyingKey::from_sec1_bytes(point.as_bytes())
                .map(EcPublicKey::P384)
                .map_err(|e| JwsError::InvalidKey(format!("Invalid P-384 public key: {e}")));
        }
        if let Ok(public) = p521::PublicKey::from_public_key_der(der) {
            let point = public.to_encoded_point(false);
            return p521::ecdsa::VerifyingKey::from_sec1_bytes(point.as_bytes())
                .map(EcPublicKey::P521)
                .map_err(|e| JwsError::InvalidKey(format!("Invalid P-521 public key: {e}")));
        }

        Err(JwsError::invalid_key(
            "Invalid EC public key: expected SPKI DER on P-256, P-384 or P-521",
        ))
    }
}

impl fmt::Debug for EcPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EcPrivateKey").field(&self.curve()).finish()
    }
}

impl fmt::Debug for EcPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EcPublicKey").field(&self.curve()).finish()
    }
}

/// Parsed signing key
pub enum PrivateKey {
    /// Shared secret for the MAC family
    Hmac(HmacSecret),
    /// RSA private key
    Rsa(RsaPrivateKey),
    /// ECDSA private key
    Ec(EcPrivateKey),
}

/// Parsed verification key
pub enum PublicKey {
    /// Shared secret for the MAC family
    Hmac(HmacSecret),
    /// RSA public key
    Rsa(RsaPublicKey),
    /// ECDSA public key
    Ec(EcPublicKey),
}

impl PrivateKey {
    /// Parse `der` in the format dictated by `alg`'s family.
    ///
    /// # Errors
    /// `InvalidAlgorithm` for an unsupported algorithm, `InvalidKey` if the
    /// blob is empty or does not parse as the family's key format.
    pub fn from_der(alg: Algorithm, der: &[u8]) -> JwsResult<Self> {
        match alg.family()? {
            Family::Mac => HmacSecret::new(der).map(PrivateKey::Hmac),
            Family::Rsa => RsaPrivateKey::from_pkcs1_der(der)
                .or_else(|_| RsaPrivateKey::from_pkcs8_der(der))
                .map(PrivateKey::Rsa)
                .map_err(|e| JwsError::InvalidKey(format!("Invalid RSA private key: {e}"))),
            Family::Ecdsa => EcPrivateKey::from_der(der).map(PrivateKey::Ec),
        }
    }

    /// Family of the key
    #[must_use]
    pub fn family(&self) -> Family {
        match self {
            PrivateKey::Hmac(_) => Family::Mac,
            PrivateKey::Rsa(_) => Family::Rsa,
            PrivateKey::Ec(_) => Family::Ecdsa,
        }
    }
}

impl PublicKey {
    /// Parse `der` in the format dictated by `alg`'s family.
    ///
    /// # Errors
    /// `InvalidAlgorithm` for an unsupported algorithm, `InvalidKey` if the
    /// blob is empty or does not parse as the family's key format.
    pub fn from_der(alg: Algorithm, der: &[u8]) -> JwsResult<Self> {
        match alg.family()? {
            Family::Mac => HmacSecret::new(der).map(PublicKey::Hmac),
            Family::Rsa => RsaPublicKey::from_pkcs1_der(der)
                .or_else(|_| RsaPublicKey::from_public_key_der(der))
                .map(PublicKey::Rsa)
                .map_err(|e| JwsError::InvalidKey(format!("Invalid RSA public key: {e}"))),
            Family::Ecdsa => EcPublicKey::from_der(der).map(PublicKey::Ec),
        }
    }

    /// Family of the key
    #[must_use]
    pub fn family(&self) -> Family {
        match self {
            PublicKey::Hmac(_) => Family::Mac,
            PublicKey::Rsa(_) => Family::Rsa,
            PublicKey::Ec(_) => Family::Ecdsa,
        }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrivateKey::Hmac(secret) => f.debug_tuple("Hmac").field(secret).finish(),
            PrivateKey::Rsa(_) => f.write_str("Rsa(..)"),
            PrivateKey::Ec(key) => f.debug_tuple("Ec").field(key).finish(),
        }
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublicKey::Hmac(secret) => f.debug_tuple("Hmac").field(secret).finish(),
            PublicKey::Rsa(_) => f.write_str("Rsa(..)"),
            PublicKey::Ec(key) => f.debug_tuple("Ec").field(key).finish(),
        }
    }
}
