//! Signing engine

use crate::algorithm::Algorithm;
use crate::algorithms::{ecdsa, hmac, rsa, utils::base64_url_encode};
use crate::claims::Claims;
use crate::error::{JwsError, JwsResult};
use crate::keys::PrivateKey;
use crate::options::SigningOptions;
use crate::token::{Header, SignatureEntry, Token};
use serde_json::Value;

/// Signing input of `token`: `base64url(JSON(header)) "." base64url(JSON(payload))`.
///
/// # Errors
/// Returns `Serialization` if the header or payload cannot be encoded.
pub fn signing_input(token: &Token) -> JwsResult<String> {
    encode_input(&token.header, &token.payload)
}

/// Sign `token` with the algorithm, key and key id in `opts`.
///
/// A `"typ": "JWS"` header is added to the token if it has no `typ`. The
/// new entry is appended to `token.signatures` and a copy returned. On error
/// the token is left untouched.
///
/// # Errors
/// * `InvalidAlgorithm` if the configured algorithm is unsupported
/// * `InvalidKey` if the private key is missing, unparsable or of another family
/// * `InvalidCurve` if an ECDSA key is not on the algorithm's curve
#[tracing::instrument(skip_all, fields(alg = %opts.algorithm(), kid = opts.key_id()))]
pub fn sign(token: &mut Token, opts: &SigningOptions) -> JwsResult<SignatureEntry> {
    let alg = opts.algorithm();
    let family = alg.family()?;
    let key = opts.private_key()?;
    if key.family() != family {
        return Err(JwsError::InvalidKey(format!(
            "{alg} requires a {family:?} key, got a {:?} key",
            key.family()
        )));
    }

    let mut header = token.header.clone();
    header
        .entry("typ".to_string())
        .or_insert_with(|| Value::from("JWS"));
    let input = encode_input(&header, &token.payload)?;

    let raw = match key {
        PrivateKey::Hmac(secret) => hmac::sign(alg, secret.as_bytes(), input.as_bytes())?,
        PrivateKey::Rsa(key) => rsa::sign(alg, key, input.as_bytes())?,
        PrivateKey::Ec(key) => ecdsa::sign(alg, key, input.as_bytes())?,
    };

    let entry_header = signature_header(alg, opts.key_id());
    let protected = base64_url_encode(&serde_json::to_vec(&entry_header)?);
    let entry = SignatureEntry::new(entry_header, protected, base64_url_encode(&raw));

    token.header = header;
    token.signatures.push(entry.clone());
    tracing::debug!(signatures = token.signatures.len(), "token signed");
    Ok(entry)
}

fn signature_header(alg: Algorithm, kid: &str) -> Header {
    let mut header = Header::new();
    header.insert("alg".to_string(), Value::from(alg.name()));
    header.insert("kid".to_string(), Value::from(kid));
    header
}

fn encode_input(header: &Header, payload: &Claims) -> JwsResult<String> {
    let header = base64_url_encode(&serde_json::to_vec(header)?);
    let payload = base64_url_encode(&serde_json::to_vec(payload)?);
    Ok(format!("{header}.{payload}"))
}
