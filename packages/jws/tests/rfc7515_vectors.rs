//! RFC 7515 appendix A test vectors

mod common;

use common::RFC7515_A3_PUBLIC;
use cryypt_jws::algorithms::{base64_url_decode, base64_url_encode, ecdsa, hmac};
use cryypt_jws::{decode_signature, Algorithm, EcPublicKey, JwsError};
use hex_literal::hex;

/// Appendix A.1 HMAC key
const A1_KEY: [u8; 64] = hex!(
    "0323354b2b0fa5bc837e0665777ba68f5ab328e6f054c928a90f84b2d2502ebf"
    "d3fb5a92d20647ef968ab4c377623d223d2e2172052e4f08c0cd9af567d080a3"
);

const A1_SIGNING_INPUT: &str = "eyJ0eXAiOiJKV1QiLA0KICJhbGciOiJIUzI1NiJ9.eyJpc3MiOiJqb2UiLA0KICJleHAiOjEzMDA4MTkzODAsDQogImh0dHA6Ly9leGFtcGxlLmNvbS9pc19yb290Ijp0cnVlfQ";

const A3_SIGNING_INPUT: &str = "eyJhbGciOiJFUzI1NiJ9.eyJpc3MiOiJqb2UiLA0KICJleHAiOjEzMDA4MTkzODAsDQogImh0dHA6Ly9leGFtcGxlLmNvbS9pc19yb290Ijp0cnVlfQ";

const A3_SIGNATURE: [u8; 64] = hex!(
    "0ed1215379636c483c2f7f155807d402a3b228033af97c7e17819ac3169ea665"
    "c50a07d38c3c70e5d8f12daf084a5480a66590c5f293509a8f3f7f8a83a354d5"
);

#[test]
fn test_a1_hs256_signature() {
    let tag = hmac::sign(Algorithm::Hs256, &A1_KEY, A1_SIGNING_INPUT.as_bytes()).unwrap();
    assert_eq!(
        tag,
        hex!("7418dfb49799e0254ffa607dd8adbbba16d4254d69d6bff05b58055853848d79")
    );
    assert_eq!(
        base64_url_encode(&tag),
        "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk"
    );
    assert_eq!(
        hmac::verify(Algorithm::Hs256, &A1_KEY, A1_SIGNING_INPUT.as_bytes(), &tag),
        Ok(())
    );
}

#[test]
fn test_a3_es256_signature_verifies() {
    let key = EcPublicKey::from_der(RFC7515_A3_PUBLIC).unwrap();
    let encoded = base64_url_encode(&A3_SIGNATURE);
    assert_eq!(
        encoded,
        "DtEhU3ljbEg8L38VWAfUAqOyKAM6-Xx-F4GawxaepmXFCgfTjDxw5djxLa8ISlSApmWQxfKTUJqPP3-Kg6NU1Q"
    );

    let signature = base64_url_decode(&encoded).unwrap();
    assert_eq!(
        ecdsa::verify(Algorithm::Es256, &key, A3_SIGNING_INPUT.as_bytes(), &signature),
        Ok(())
    );
}

#[test]
fn test_a3_components_split_at_midpoint() {
    let pair = decode_signature(Algorithm::Es256, &A3_SIGNATURE).unwrap();
    assert_eq!(pair.r.as_be_bytes(), &A3_SIGNATURE[..32]);
    assert_eq!(pair.s.as_be_bytes(), &A3_SIGNATURE[32..]);
}

#[test]
fn test_a3_altered_input_is_rejected() {
    let key = EcPublicKey::from_der(RFC7515_A3_PUBLIC).unwrap();
    let mut input = A3_SIGNING_INPUT.as_bytes().to_vec();
    let last = input.len() - 1;
    input[last] = b'R';

    assert_eq!(
        ecdsa::verify(Algorithm::Es256, &key, &input, &A3_SIGNATURE),
        Err(JwsError::AlteredMessage)
    );
}

#[test]
fn test_a3_key_refuses_es384() {
    let key = EcPublicKey::from_der(RFC7515_A3_PUBLIC).unwrap();
    assert!(matches!(
        ecdsa::verify(Algorithm::Es384, &key, A3_SIGNING_INPUT.as_bytes(), &A3_SIGNATURE),
        Err(JwsError::InvalidCurve { .. })
    ));
}
