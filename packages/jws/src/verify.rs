//! Verification engine

use crate::algorithm::Algorithm;
use crate::algorithms::{ecdsa, hmac, rsa};
use crate::error::{JwsError, JwsResult};
use crate::keys::PublicKey;
use crate::options::SigningOptions;
use crate::sign::signing_input;
use crate::token::{SignatureEntry, Token};

/// Verify the signature on `token` selected by `opts`' key id.
///
/// Every step has to pass: lookup, declared algorithm, key family, curve
/// and the cryptographic check. The signing input is always recomputed
/// from the token's header and payload.
///
/// # Errors
/// * `SignatureNotFound` if no entry can be selected
/// * `HeaderNotFound` if the entry has no `alg`
/// * `InvalidAlgorithm` if the entry's `alg` differs from the configured one
/// * `InvalidKey` if the public key is missing, unparsable or of another family
/// * `InvalidCurve` if an ECDSA key is not on the algorithm's curve
/// * `MalformedSignature` or `InvalidSignatureLength` for a structurally bad signature
/// * `AlteredMessage` if the signature does not verify
#[tracing::instrument(skip_all, fields(alg = %opts.algorithm(), kid = opts.key_id()))]
pub fn verify(token: &Token, opts: &SigningOptions) -> JwsResult<()> {
    let result = verify_entry(token, opts);
    match &result {
        Ok(()) => tracing::debug!("signature verified"),
        Err(e) => tracing::warn!(error = %e, "signature verification failed"),
    }
    result
}

fn verify_entry(token: &Token, opts: &SigningOptions) -> JwsResult<()> {
    let alg = opts.algorithm();
    let family = alg.family()?;

    let entry = find_signature(token, opts.key_id())?;
    let declared = check_header(entry)?;
    if declared != alg {
        return Err(JwsError::InvalidAlgorithm(format!(
            "signature declares {declared}, expected {alg}"
        )));
    }

    let key = opts.public_key()?;
    if key.family() != family {
        return Err(JwsError::InvalidKey(format!(
            "{alg} requires a {family:?} key, got a {:?} key",
            key.family()
        )));
    }

    let signature = entry.signature_bytes()?;
    let input = signing_input(token)?;

    match key {
        PublicKey::Hmac(secret) => {
            hmac::verify(alg, secret.as_bytes(), input.as_bytes(), &signature)
        }
        PublicKey::Rsa(key) => rsa::verify(alg, key, input.as_bytes(), &signature),
        PublicKey::Ec(key) => ecdsa::verify(alg, key, input.as_bytes(), &signature),
    }
}

/// Select the signature entry for `kid`.
///
/// A lone entry is returned whatever its `kid`; otherwise the first entry
/// whose `kid` equals `kid` wins.
///
/// # Errors
/// Returns `SignatureNotFound` if the token has no signatures, or several
/// and none with a matching `kid`.
pub fn find_signature<'a>(token: &'a Token, kid: &str) -> JwsResult<&'a SignatureEntry> {
    match token.signatures.as_slice() {
        [] => Err(JwsError::signature_not_found(kid)),
        [only] => Ok(only),
        entries => entries
            .iter()
            .find(|entry| entry.key_id() == Some(kid))
            .ok_or_else(|| JwsError::signature_not_found(kid)),
    }
}

/// Algorithm declared by `entry`.
///
/// # Errors
/// Returns `HeaderNotFound` if the header has no `alg` string.
pub fn check_header(entry: &SignatureEntry) -> JwsResult<Algorithm> {
    entry.algorithm().ok_or(JwsError::HeaderNotFound)
}
