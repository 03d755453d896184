//! Per-signer configuration
//!
//! [`SigningOptions`] holds the algorithm, the key identifier written to each
//! signature header, and the raw key blobs. Blobs are parsed on first use and
//! the outcome is memoised, failures included, until the blob is replaced.
//!
//! The memo cells are not synchronised, so the type is `Send` but not `Sync`.
//! Parse once (call [`SigningOptions::private_key`] or
//! [`SigningOptions::public_key`]) before handing a clone to another thread,
//! or guard shared access externally.

use crate::algorithm::{Algorithm, Family};
use crate::error::JwsResult;
use crate::keys::{PrivateKey, PublicKey};
use once_cell::unsync::OnceCell;
use std::fmt;
use zeroize::Zeroizing;

/// Algorithm, key id and key material for one signer or verifier
pub struct SigningOptions {
    algorithm: Algorithm,
    key_id: String,
    private_blob: Zeroizing<Vec<u8>>,
    public_blob: Zeroizing<Vec<u8>>,
    private_key: OnceCell<JwsResult<PrivateKey>>,
    public_key: OnceCell<JwsResult<PublicKey>>,
}

impl SigningOptions {
    /// Options for `algorithm` with no key id and no keys
    #[must_use]
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            key_id: String::new(),
            private_blob: Zeroizing::new(Vec::new()),
            public_blob: Zeroizing::new(Vec::new()),
            private_key: OnceCell::new(),
            public_key: OnceCell::new(),
        }
    }

    /// Empty options; every operation fails until an algorithm and keys are set
    #[must_use]
    pub fn blank() -> Self {
        Self::new(Algorithm::Unsupported)
    }

    /// Set the algorithm. Cached keys are dropped since their parse depends on it.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self.private_key = OnceCell::new();
        self.public_key = OnceCell::new();
        self
    }

    /// Set the `kid` written into signature headers and used for lookup
    #[must_use]
    pub fn with_key_id(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = key_id.into();
        self
    }

    /// Set the private key blob
    #[must_use]
    pub fn with_private_key(mut self, der: &[u8]) -> Self {
        self.load_private_key(der);
        self
    }

    /// Set the public key blob
    #[must_use]
    pub fn with_public_key(mut self, der: &[u8]) -> Self {
        self.load_public_key(der);
        self
    }

    /// Set the MAC shared secret as both the signing and verification key.
    #[must_use]
    pub fn with_secret(self, secret: &[u8]) -> Self {
        self.with_private_key(secret).with_public_key(secret)
    }

    /// Use an already parsed private key
    #[must_use]
    pub fn with_parsed_private_key(mut self, key: PrivateKey) -> Self {
        self.private_blob = Zeroizing::new(Vec::new());
        self.private_key = OnceCell::with_value(Ok(key));
        self
    }

    /// Use an already parsed public key
    #[must_use]
    pub fn with_parsed_public_key(mut self, key: PublicKey) -> Self {
        self.public_blob = Zeroizing::new(Vec::new());
        self.public_key = OnceCell::with_value(Ok(key));
        self
    }

    /// Replace the private key blob and forget any cached parse
    pub fn load_private_key(&mut self, der: &[u8]) {
        self.private_blob = Zeroizing::new(der.to_vec());
        self.private_key = OnceCell::new();
    }

    /// Replace the public key blob and forget any cached parse
    pub fn load_public_key(&mut self, der: &[u8]) {
        self.public_blob = Zeroizing::new(der.to_vec());
        self.public_key = OnceCell::new();
    }

    /// Configured algorithm
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Configured key id (empty when unset)
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Parsed private key, parsing the blob on first call.
    ///
    /// # Errors
    /// `InvalidAlgorithm` if the algorithm is unsupported, `InvalidKey` if the
    /// blob is missing or does not parse for the algorithm's family. The
    /// error is cached like a success.
    pub fn private_key(&self) -> JwsResult<&PrivateKey> {
        self.private_key
            .get_or_init(|| {
                tracing::trace!(alg = self.algorithm.name(), "parsing private key");
                PrivateKey::from_der(self.algorithm, &self.private_blob)
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Parsed public key, parsing the blob on first call.
    ///
    /// # Errors
    /// As for [`SigningOptions::private_key`].
    pub fn public_key(&self) -> JwsResult<&PublicKey> {
        self.public_key
            .get_or_init(|| {
                tracing::trace!(alg = self.algorithm.name(), "parsing public key");
                PublicKey::from_der(self.algorithm, &self.public_blob)
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Whether the configured algorithm uses a shared secret
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        matches!(self.algorithm.family(), Ok(Family::Mac))
    }
}

impl Default for SigningOptions {
    fn default() -> Self {
        Self::blank()
    }
}

impl fmt::Debug for SigningOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningOptions")
            .field("algorithm", &self.algorithm)
            .field("key_id", &self.key_id)
            .field("private_key", &self.private_key.get().map(Result::is_ok))
            .field("public_key", &self.public_key.get().map(Result::is_ok))
            .finish_non_exhaustive()
    }
}
