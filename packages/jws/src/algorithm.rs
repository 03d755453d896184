//! Algorithm catalog
//!
//! Maps the closed set of JWS algorithm names (RFC 7518 §3.1) to their
//! family, hash function and, for ECDSA, the one curve the algorithm may be
//! used with. The table is a process-wide constant; every curve/algorithm
//! consistency check in the crate reads it through [`Algorithm::curve`].

use crate::error::{JwsError, JwsResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::fmt;
use std::str::FromStr;

/// JWS signature algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// HMAC using SHA-256
    Hs256,
    /// HMAC using SHA-384
    Hs384,
    /// HMAC using SHA-512
    Hs512,
    /// RSASSA-PKCS1-v1_5 using SHA-256
    Rs256,
    /// RSASSA-PKCS1-v1_5 using SHA-384
    Rs384,
    /// RSASSA-PKCS1-v1_5 using SHA-512
    Rs512,
    /// ECDSA using P-256 and SHA-256
    Es256,
    /// ECDSA using P-384 and SHA-384
    Es384,
    /// ECDSA using P-521 and SHA-512
    Es512,
    /// Any name outside the catalog
    Unsupported,
}

/// Cryptographic family an algorithm belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Keyed hash over a shared secret
    Mac,
    /// RSA PKCS#1 v1.5 signatures
    Rsa,
    /// Elliptic-curve DSA signatures
    Ecdsa,
}

/// Hash function bound to an algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashFunction {
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

/// NIST curve bound to an ECDSA algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    /// secp256r1
    P256,
    /// secp384r1
    P384,
    /// secp521r1
    P521,
}

/// One row of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmDescriptor {
    /// The algorithm this row describes
    pub algorithm: Algorithm,
    /// Header `alg` value
    pub name: &'static str,
    /// Cryptographic family
    pub family: Family,
    /// Hash applied to the signing input
    pub hash: HashFunction,
    /// Required curve, ECDSA only
    pub curve: Option<Curve>,
}

const fn row(
    algorithm: Algorithm,
    name: &'static str,
    family: Family,
    hash: HashFunction,
    curve: Option<Curve>,
) -> AlgorithmDescriptor {
    AlgorithmDescriptor {
        algorithm,
        name,
        family,
        hash,
        curve,
    }
}

static CATALOG: [AlgorithmDescriptor; 9] = [
    row(
        Algorithm::Hs256,
        "HS256",
        Family::Mac,
        HashFunction::Sha256,
        None,
    ),
    row(
        Algorithm::Hs384,
        "HS384",
        Family::Mac,
        HashFunction::Sha384,
        None,
    ),
    row(
        Algorithm::Hs512,
        "HS512",
        Family::Mac,
        HashFunction::Sha512,
        None,
    ),
    row(
        Algorithm::Rs256,
        "RS256",
        Family::Rsa,
        HashFunction::Sha256,
        None,
    ),
    row(
        Algorithm::Rs384,
        "RS384",
        Family::Rsa,
        HashFunction::Sha384,
        None,
    ),
    row(
        Algorithm::Rs512,
        "RS512",
        Family::Rsa,
        HashFunction::Sha512,
        None,
    ),
    row(
        Algorithm::Es256,
        "ES256",
        Family::Ecdsa,
        HashFunction::Sha256,
        Some(Curve::P256),
    ),
    row(
        Algorithm::Es384,
        "ES384",
        Family::Ecdsa,
        HashFunction::Sha384,
        Some(Curve::P384),
    ),
    row(
        Algorithm::Es512,
        "ES512",
        Family::Ecdsa,
        HashFunction::Sha512,
        Some(Curve::P521),
    ),
];

impl Algorithm {
    /// Every supported algorithm, in catalog order
    pub const SUPPORTED: [Algorithm; 9] = [
        Algorithm::Hs256,
        Algorithm::Hs384,
        Algorithm::Hs512,
        Algorithm::Rs256,
        Algorithm::Rs384,
        Algorithm::Rs512,
        Algorithm::Es256,
        Algorithm::Es384,
        Algorithm::Es512,
    ];

    /// Catalog row for this algorithm
    ///
    /// # Errors
    /// Returns `InvalidAlgorithm` for [`Algorithm::Unsupported`].
    pub fn descriptor(self) -> JwsResult<&'static AlgorithmDescriptor> {
        CATALOG
            .iter()
            .find(|row| row.algorithm == self)
            .ok_or_else(|| JwsError::invalid_algorithm("algorithm is not in the catalog"))
    }

    /// Header `alg` value, or `""` for [`Algorithm::Unsupported`]
    #[must_use]
    pub fn name(self) -> &'static str {
        self.descriptor().map(|row| row.name).unwrap_or("")
    }

    /// Look up an algorithm by its header name. Unknown names (including the
    /// empty string) map to [`Algorithm::Unsupported`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        CATALOG
            .iter()
            .find(|row| row.name == name)
            .map_or(Algorithm::Unsupported, |row| row.algorithm)
    }

    /// Whether the algorithm is in the catalog
    #[must_use]
    pub fn is_supported(self) -> bool {
        self != Algorithm::Unsupported
    }

    /// Cryptographic family
    ///
    /// # Errors
    /// Returns `InvalidAlgorithm` for [`Algorithm::Unsupported`].
    pub fn family(self) -> JwsResult<Family> {
        self.descriptor().map(|row| row.family)
    }

    /// Hash function applied to the signing input
    ///
    /// # Errors
    /// Returns `InvalidAlgorithm` for [`Algorithm::Unsupported`].
    pub fn hash(self) -> JwsResult<HashFunction> {
        self.descriptor().map(|row| row.hash)
    }

    /// Required curve; `None` for the MAC and RSA families
    ///
    /// # Errors
    /// Returns `InvalidAlgorithm` for [`Algorithm::Unsupported`].
    pub fn curve(self) -> JwsResult<Option<Curve>> {
        self.descriptor().map(|row| row.curve)
    }

    /// Required curve for an algorithm that must be ECDSA
    ///
    /// # Errors
    /// Returns `InvalidAlgorithm` if the algorithm is unsupported or not ECDSA.
    pub fn ecdsa_curve(self) -> JwsResult<Curve> {
        self.curve()?.ok_or_else(|| {
            JwsError::InvalidAlgorithm(format!("{} is not an ECDSA algorithm", self.name()))
        })
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Unsupported => f.write_str("unsupported"),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for Algorithm {
    type Err = JwsError;

    /// Strict parse for configuration input; use [`Algorithm::from_name`]
    /// for the total mapping.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Algorithm::from_name(s) {
            Algorithm::Unsupported => Err(JwsError::InvalidAlgorithm(s.to_string())),
            alg => Ok(alg),
        }
    }
}

impl Serialize for Algorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Algorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Algorithm::from_name(&name))
    }
}

impl HashFunction {
    /// Digest of `message`
    #[must_use]
    pub fn digest(self, message: &[u8]) -> Vec<u8> {
        match self {
            HashFunction::Sha256 => Sha256::digest(message).to_vec(),
            HashFunction::Sha384 => Sha384::digest(message).to_vec(),
            HashFunction::Sha512 => Sha512::digest(message).to_vec(),
        }
    }

    /// Digest length in bytes
    #[must_use]
    pub fn output_len(self) -> usize {
        match self {
            HashFunction::Sha256 => 32,
            HashFunction::Sha384 => 48,
            HashFunction::Sha512 => 64,
        }
    }
}

impl Curve {
    /// JWA curve name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Curve::P256 => "P-256",
            Curve::P384 => "P-384",
            Curve::P521 => "P-521",
        }
    }

    /// Total length of an encoded `r || s` signature
    #[must_use]
    pub fn signature_len(self) -> usize {
        match self {
            Curve::P256 => 64,
            Curve::P384 => 96,
            Curve::P521 => 132,
        }
    }

    /// Width of one integer slot in an encoded signature
    #[must_use]
    pub fn slot_width(self) -> usize {
        self.signature_len() / 2
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
