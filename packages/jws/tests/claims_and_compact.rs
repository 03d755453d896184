//! Tests for registered claim accessors and compact serialization

mod common;

use chrono::{Duration, Utc};
use common::*;
use cryypt_jws::{sign, verify, Algorithm, Audience, Claims, JwsError, NumericDate, Token};
use serde_json::json;

#[test]
fn test_registered_claims_set_get_delete() {
    let mut claims = Claims::new();
    claims.set_issuer("joe");
    claims.set_subject("alice");
    claims.set_token_id("id-1");
    claims.set_not_before(10);
    claims.set_issued_at(20);
    claims.set_expiration_time(30);

    assert_eq!(claims.issuer(), Some("joe"));
    assert_eq!(claims.subject(), Some("alice"));
    assert_eq!(claims.token_id(), Some("id-1"));
    assert_eq!(claims.not_before(), 10);
    assert_eq!(claims.issued_at(), 20);
    assert_eq!(claims.expiration_time(), 30);

    claims.remove_issuer();
    claims.remove_subject();
    claims.remove_token_id();
    claims.remove_not_before();
    claims.remove_issued_at();
    claims.remove_expiration_time();
    assert_eq!(claims, Claims::new());
    assert_eq!(claims.expiration_time(), 0);
}

#[test]
fn test_audience_string_or_list() {
    let single: Claims = serde_json::from_value(json!({"aud": "svc"})).unwrap();
    assert_eq!(single.audience(), vec!["svc".to_string()]);
    assert_eq!(single.aud, Some(Audience::One("svc".to_string())));

    let many: Claims = serde_json::from_value(json!({"aud": ["a", "b"]})).unwrap();
    assert_eq!(many.audience(), vec!["a".to_string(), "b".to_string()]);
    assert!(many.aud.as_ref().is_some_and(|aud| aud.contains("b")));

    let mut claims = Claims::new();
    claims.set_audience(["x", "y"].as_slice());
    assert_eq!(serde_json::to_value(&claims).unwrap(), json!({"aud": ["x", "y"]}));
    claims.remove_audience();
    assert!(claims.audience().is_empty());
}

#[test]
fn test_mistyped_time_claims_read_as_zero() {
    let value = json!({"iss": "joe", "exp": "tomorrow"});
    let claims: Claims = serde_json::from_value(value).unwrap();
    assert_eq!(claims.issuer(), Some("joe"));
    assert_eq!(claims.expiration_time(), 0);
    assert_eq!(claims.expires_at(), None);

    let fractional: Claims = serde_json::from_str(r#"{"exp":1300819380.5}"#).unwrap();
    assert_eq!(fractional.expiration_time(), 0);
    assert_eq!(
        serde_json::to_string(&fractional).unwrap(),
        r#"{"exp":1300819380.5}"#
    );
}

#[test]
fn test_token_with_mistyped_exp_still_verifies() {
    let opts = options(Algorithm::Hs256, "k");
    let mut token = Token::new();
    token.header.insert("alg".to_string(), json!("HS256"));
    token.header.insert("kid".to_string(), json!("k"));
    token.payload.insert("exp", "soon").unwrap();
    sign(&mut token, &opts).unwrap();

    let compact = token.compact_serialization(Some("k")).unwrap();
    let parsed = Token::from_compact(&compact).unwrap();
    assert_eq!(parsed.payload.expiration_time(), 0);
    assert_eq!(
        parsed.payload.exp.as_ref().map(NumericDate::as_value),
        Some(&json!("soon"))
    );
    assert_eq!(verify(&parsed, &opts), Ok(()));
}

#[test]
fn test_chrono_helpers() {
    let mut claims = Claims::new();
    let before = Utc::now().timestamp();
    claims.expires_in(Duration::hours(1));
    claims.issued_now();

    assert!(claims.expiration_time() >= before + 3600);
    assert!(claims.issued_at() >= before);
    assert_eq!(
        claims.expires_at().map(|at| at.timestamp()),
        Some(claims.expiration_time())
    );
}

#[test]
fn test_extension_claims_survive_signing() {
    let mut token = sample_token();
    sign(&mut token, &options(Algorithm::Hs256, "k")).unwrap();
    assert_eq!(token.payload.get("http://example.com/is_root"), Some(&json!(true)));
    assert_eq!(token.payload.issuer(), Some("joe"));
}

#[test]
fn test_unsigned_token_compacts_to_two_segments() {
    let token = sample_token();
    let compact = token.compact_serialization(None).unwrap();
    assert_eq!(compact.split('.').count(), 2);

    let parsed = Token::from_compact(&compact).unwrap();
    assert_eq!(parsed, token);
}

#[test]
fn test_compact_round_trip_verifies() {
    for alg in Algorithm::SUPPORTED {
        let opts = options(alg, "k");
        let mut token = sample_token();
        token.header.insert("alg".to_string(), json!(alg.name()));
        token.header.insert("kid".to_string(), json!("k"));
        sign(&mut token, &opts).unwrap();

        let compact = token.compact_serialization(Some("k")).unwrap();
        assert_eq!(compact.split('.').count(), 3);

        let parsed = Token::from_compact(&compact).unwrap();
        assert_eq!(parsed.header, token.header);
        assert_eq!(parsed.payload, token.payload);
        assert_eq!(parsed.signatures[0].signature(), token.signatures[0].signature());
        assert_eq!(verify(&parsed, &opts), Ok(()), "{alg}");
    }
}

#[test]
fn test_compact_picks_signature_by_kid() {
    let mut token = sample_token();
    let a = sign(&mut token, &options(Algorithm::Hs256, "a")).unwrap();
    let b = sign(&mut token, &options(Algorithm::Hs384, "b")).unwrap();

    let compact_a = token.compact_serialization(Some("a")).unwrap();
    let compact_b = token.compact_serialization(Some("b")).unwrap();
    assert!(compact_a.ends_with(a.signature()));
    assert!(compact_b.ends_with(b.signature()));

    assert_eq!(
        token.compact_serialization(Some("c")),
        Err(JwsError::SignatureNotFound("c".to_string()))
    );
    assert!(matches!(
        token.compact_serialization(None),
        Err(JwsError::SignatureNotFound(_))
    ));
}

#[test]
fn test_compact_without_alg_cannot_verify() {
    let opts = options(Algorithm::Hs256, "k");
    let mut token = sample_token();
    sign(&mut token, &opts).unwrap();

    let parsed = Token::from_compact(&token.compact_serialization(None).unwrap()).unwrap();
    assert_eq!(verify(&parsed, &opts), Err(JwsError::HeaderNotFound));
}

#[test]
fn test_compact_with_bad_signature_segment() {
    let compact = format!("{}.!!!", sample_token().compact_serialization(None).unwrap());
    assert!(matches!(
        Token::from_compact(&compact),
        Err(JwsError::MalformedSignature(_))
    ));
}

#[test]
fn test_token_json_shape() {
    let mut token = sample_token();
    sign(&mut token, &options(Algorithm::Hs256, "k")).unwrap();

    let value = serde_json::to_value(&token).unwrap();
    assert_eq!(value["headers"], json!({"typ": "JWS"}));
    assert_eq!(value["payload"]["iss"], json!("joe"));
    assert_eq!(value["signatures"][0]["header"], json!({"alg": "HS256", "kid": "k"}));
    assert!(value["signatures"][0]["protected"].is_string());

    let back: Token = serde_json::from_value(value).unwrap();
    assert_eq!(back, token);
}
