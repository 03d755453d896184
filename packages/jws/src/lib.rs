//! JSON Web Signature (JWS) signing and verification
//!
//! This crate provides:
//! - HS256/384/512, RS256/384/512 and ES256/384/512 (RFC 7518 §3)
//! - Multiple signatures per token, selected by `kid`
//! - Fixed-width `r || s` encoding for ECDSA signatures
//! - Curve and algorithm consistency checks against algorithm confusion
//!
//! ```no_run
//! use cryypt_jws::{sign, verify, Algorithm, SigningOptions, Token};
//!
//! # fn main() -> cryypt_jws::JwsResult<()> {
//! let mut token = Token::new();
//! token.payload.set_issuer("joe");
//!
//! let opts = SigningOptions::new(Algorithm::Hs256)
//!     .with_key_id("primary")
//!     .with_secret(b"a shared secret of at least 32 bytes!");
//!
//! sign(&mut token, &opts)?;
//! verify(&token, &opts)?;
//! # Ok(())
//! # }
//! ```

pub mod algorithm;
pub mod algorithms;
pub mod claims;
pub mod codec;
mod error;
pub mod keys;
pub mod options;
mod sign;
pub mod token;
mod verify;

pub use algorithm::{Algorithm, AlgorithmDescriptor, Curve, Family, HashFunction};
pub use claims::{Audience, Claims, NumericDate};
pub use codec::{decode_signature, encode_signature, SignaturePair, UnsignedInt};
pub use error::*;
pub use keys::{EcPrivateKey, EcPublicKey, HmacSecret, PrivateKey, PublicKey};
pub use options::SigningOptions;
pub use sign::{sign, signing_input};
pub use token::{Header, SignatureEntry, Token};
pub use verify::{check_header, find_signature, verify};
