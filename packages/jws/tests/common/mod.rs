//! Shared fixtures for the integration tests
#![allow(dead_code)]

use cryypt_jws::{Algorithm, Claims, SigningOptions, Token};

pub const P256_PRIVATE: &[u8] = include_bytes!("../fixtures/p256_private.der");
pub const P256_PUBLIC: &[u8] = include_bytes!("../fixtures/p256_public.der");
pub const P256_ALT_PRIVATE: &[u8] = include_bytes!("../fixtures/p256_alt_private.der");
pub const P256_ALT_PUBLIC: &[u8] = include_bytes!("../fixtures/p256_alt_public.der");
pub const P384_PRIVATE: &[u8] = include_bytes!("../fixtures/p384_private.der");
pub const P384_PUBLIC: &[u8] = include_bytes!("../fixtures/p384_public.der");
pub const P521_PRIVATE: &[u8] = include_bytes!("../fixtures/p521_private.der");
pub const P521_PUBLIC: &[u8] = include_bytes!("../fixtures/p521_public.der");
pub const RSA_PRIVATE: &[u8] = include_bytes!("../fixtures/rsa_private.der");
pub const RSA_PUBLIC: &[u8] = include_bytes!("../fixtures/rsa_public.der");
pub const RSA_ALT_PRIVATE: &[u8] = include_bytes!("../fixtures/rsa_alt_private.der");
pub const RSA_ALT_PUBLIC: &[u8] = include_bytes!("../fixtures/rsa_alt_public.der");
pub const RFC7515_A3_PUBLIC: &[u8] = include_bytes!("../fixtures/rfc7515_a3_public.der");

pub const HMAC_SECRET: &[u8] = b"0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

/// Private and public blobs matching `alg`
pub fn key_pair(alg: Algorithm) -> (&'static [u8], &'static [u8]) {
    match alg {
        Algorithm::Hs256 | Algorithm::Hs384 | Algorithm::Hs512 => (HMAC_SECRET, HMAC_SECRET),
        Algorithm::Rs256 | Algorithm::Rs384 | Algorithm::Rs512 => (RSA_PRIVATE, RSA_PUBLIC),
        Algorithm::Es256 => (P256_PRIVATE, P256_PUBLIC),
        Algorithm::Es384 => (P384_PRIVATE, P384_PUBLIC),
        Algorithm::Es512 => (P521_PRIVATE, P521_PUBLIC),
        Algorithm::Unsupported => (&[], &[]),
    }
}

/// Options for `alg` with its matching key pair and `kid`
pub fn options(alg: Algorithm, kid: &str) -> SigningOptions {
    let (private, public) = key_pair(alg);
    SigningOptions::new(alg)
        .with_key_id(kid)
        .with_private_key(private)
        .with_public_key(public)
}

/// Claims from RFC 7519 §3.1
pub fn sample_claims() -> Claims {
    let mut claims = Claims::new();
    claims.set_issuer("joe");
    claims.set_expiration_time(1_300_819_380);
    claims
        .insert("http://example.com/is_root", true)
        .expect("extension claim");
    claims
}

pub fn sample_token() -> Token {
    Token::with_payload(sample_claims())
}
