//! Algorithm families
//!
//! Thin adapters over the RustCrypto primitives. Each family module exposes
//! `sign`/`verify` over a raw message so the engines [`crate::sign()`] and
//! [`crate::verify()`] only dispatch on [`crate::algorithm::Family`].

pub mod ecdsa;
pub mod hmac;
pub mod rsa;
pub mod utils;

pub use utils::{base64_url_decode, base64_url_encode};
