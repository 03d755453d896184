//! Token and signature entries
//!
//! A [`Token`] is a header map, a claim set and any number of attached
//! signatures. Its serde form uses the field names `headers`, `payload` and
//! `signatures`.

use crate::algorithm::Algorithm;
use crate::algorithms::utils::{base64_url_decode, base64_url_encode};
use crate::claims::Claims;
use crate::error::{JwsError, JwsResult};
use crate::sign::signing_input;
use crate::verify::find_signature;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// JOSE header object
pub type Header = BTreeMap<String, Value>;

/// One signature over a token
///
/// Created by [`crate::sign()`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureEntry {
    header: Header,
    protected: String,
    signature: String,
}

impl SignatureEntry {
    pub(crate) fn new(header: Header, protected: String, signature: String) -> Self {
        Self {
            header,
            protected,
            signature,
        }
    }

    /// Unprotected per-signature header (`alg`, `kid`)
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Base64url of the JSON protected header
    #[must_use]
    pub fn protected(&self) -> &str {
        &self.protected
    }

    /// Base64url of the raw signature bytes
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Declared algorithm, `None` when the header has no `alg` string
    #[must_use]
    pub fn algorithm(&self) -> Option<Algorithm> {
        self.header
            .get("alg")
            .and_then(Value::as_str)
            .map(Algorithm::from_name)
    }

    /// Declared key id
    #[must_use]
    pub fn key_id(&self) -> Option<&str> {
        self.header.get("kid").and_then(Value::as_str)
    }

    /// Raw signature bytes.
    ///
    /// # Errors
    /// Returns `MalformedSignature` if the stored value is not base64url.
    pub fn signature_bytes(&self) -> JwsResult<Vec<u8>> {
        base64_url_decode(&self.signature)
            .map_err(|e| JwsError::MalformedSignature(format!("signature is not base64url: {e}")))
    }
}

/// A token with zero or more signatures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Token header
    #[serde(rename = "headers")]
    pub header: Header,
    /// Claim set
    pub payload: Claims,
    /// Attached signatures in signing order
    pub signatures: Vec<SignatureEntry>,
}

impl Token {
    /// Empty token
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Token carrying `payload` with an empty header
    #[must_use]
    pub fn with_payload(payload: Claims) -> Self {
        Self {
            payload,
            ..Self::default()
        }
    }

    /// Compact serialization `header.payload.signature` (RFC 7515 §7.1).
    ///
    /// With one signature it is used whatever `kid` says; with several, the
    /// first whose `kid` matches is used. An unsigned token serializes as
    /// `header.payload`.
    ///
    /// # Errors
    /// `SignatureNotFound` if several signatures exist and none matches
    /// `kid`, `Serialization` if the header or payload cannot be encoded.
    pub fn compact_serialization(&self, kid: Option<&str>) -> JwsResult<String> {
        let input = signing_input(self)?;
        if self.signatures.is_empty() {
            return Ok(input);
        }
        let entry = find_signature(self, kid.unwrap_or_default())?;
        Ok(format!("{input}.{}", entry.signature()))
    }

    /// Parse a compact serialization.
    ///
    /// A three-part input yields one signature entry whose header holds the
    /// token header's `alg` and `kid`. Verification recomputes the signing
    /// input from the parsed header and payload, so it only succeeds for
    /// tokens whose segments are the canonical encoding produced by this
    /// crate.
    ///
    /// # Errors
    /// `MalformedToken` for a wrong segment count or undecodable header or
    /// payload, `MalformedSignature` for a signature segment that is not
    /// base64url.
    pub fn from_compact(compact: &str) -> JwsResult<Self> {
        let parts: Vec<&str> = compact.split('.').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(JwsError::MalformedToken(format!(
                "expected 2 or 3 segments, found {}",
                parts.len()
            )));
        }

        let header: Header = decode_segment(parts[0], "header")?;
        let payload: Claims = decode_segment(parts[1], "payload")?;
        let mut token = Self {
            header,
            payload,
            signatures: Vec::new(),
        };

        if let Some(signature) = parts.get(2) {
            base64_url_decode(signature).map_err(|e| {
                JwsError::MalformedSignature(format!("signature is not base64url: {e}"))
            })?;

            let entry_header: Header = ["alg", "kid"]
                .iter()
                .filter_map(|name| {
                    token
                        .header
                        .get(*name)
                        .map(|value| ((*name).to_string(), value.clone()))
                })
                .collect();
            let protected = base64_url_encode(&serde_json::to_vec(&entry_header)?);
            token.signatures.push(SignatureEntry::new(
                entry_header,
                protected,
                (*signature).to_string(),
            ));
        }

        Ok(token)
    }
}

fn decode_segment<T: serde::de::DeserializeOwned>(segment: &str, what: &str) -> JwsResult<T> {
    let bytes = base64_url_decode(segment)
        .map_err(|e| JwsError::MalformedToken(format!("{what} is not base64url: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| JwsError::MalformedToken(format!("{what} is not a JSON object: {e}")))
}
