//! Token payload claims (RFC 7519 §4)
//!
//! Registered claims are typed optional fields; anything else lives in a
//! sorted extension map flattened next to them. A given [`Claims`] value
//! therefore always encodes to the same JSON bytes.
//!
//! Time claims keep whatever JSON value they were given. A value that is
//! not an integer reads as 0 but still encodes unchanged, so a received
//! payload keeps its signing input.

use crate::error::JwsResult;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Audience claim: a single recipient or a list of them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    /// `"aud": "service"`
    One(String),
    /// `"aud": ["a", "b"]`
    Many(Vec<String>),
}

impl Audience {
    /// Recipients as a list
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Audience::One(aud) => vec![aud.clone()],
            Audience::Many(list) => list.clone(),
        }
    }

    /// Whether `recipient` is one of the audience values
    #[must_use]
    pub fn contains(&self, recipient: &str) -> bool {
        match self {
            Audience::One(aud) => aud == recipient,
            Audience::Many(list) => list.iter().any(|aud| aud == recipient),
        }
    }
}

impl From<&str> for Audience {
    fn from(aud: &str) -> Self {
        Audience::One(aud.to_string())
    }
}

impl From<String> for Audience {
    fn from(aud: String) -> Self {
        Audience::One(aud)
    }
}

impl From<Vec<String>> for Audience {
    fn from(list: Vec<String>) -> Self {
        Audience::Many(list)
    }
}

impl From<&[&str]> for Audience {
    fn from(list: &[&str]) -> Self {
        Audience::Many(list.iter().map(|s| (*s).to_string()).collect())
    }
}

/// NumericDate claim value (`exp`, `nbf`, `iat`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumericDate(Value);

impl NumericDate {
    /// Date at `secs` unix seconds
    #[must_use]
    pub fn from_seconds(secs: i64) -> Self {
        Self(Value::from(secs))
    }

    /// Whole unix seconds, `None` unless the value is a JSON integer
    #[must_use]
    pub fn seconds(&self) -> Option<i64> {
        self.0.as_i64()
    }

    /// JSON value as stored
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<i64> for NumericDate {
    fn from(secs: i64) -> Self {
        Self::from_seconds(secs)
    }
}

// `Option<T>` would swallow an explicit `null`.
fn present_date<'de, D>(deserializer: D) -> Result<Option<NumericDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| Some(NumericDate(value)))
}

fn read_time(name: &str, date: Option<&NumericDate>) -> i64 {
    match date {
        None => 0,
        Some(date) => date.seconds().unwrap_or_else(|| {
            tracing::debug!(claim = name, value = %date.0, "time claim is not an integer");
            0
        }),
    }
}

/// Claim set carried as the token payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Subject
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Audience
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,
    /// Expiration time
    #[serde(
        default,
        deserialize_with = "present_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub exp: Option<NumericDate>,
    /// Not before
    #[serde(
        default,
        deserialize_with = "present_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub nbf: Option<NumericDate>,
    /// Issued at
    #[serde(
        default,
        deserialize_with = "present_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub iat: Option<NumericDate>,
    /// Token id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl Claims {
    /// Empty claim set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a claim by name.
    ///
    /// Registered names are converted into their typed field; other names
    /// go to the extension map. Time claims accept any value.
    ///
    /// # Errors
    /// Returns `Serialization` if `iss`, `sub`, `aud` or `jti` gets a value
    /// of the wrong JSON type.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> JwsResult<()> {
        let name = name.into();
        let value = value.into();
        match name.as_str() {
            "iss" => self.iss = Some(serde_json::from_value(value)?),
            "sub" => self.sub = Some(serde_json::from_value(value)?),
            "aud" => self.aud = Some(serde_json::from_value(value)?),
            "exp" => self.exp = Some(NumericDate(value)),
            "nbf" => self.nbf = Some(NumericDate(value)),
            "iat" => self.iat = Some(NumericDate(value)),
            "jti" => self.jti = Some(serde_json::from_value(value)?),
            _ => {
                self.extra.insert(name, value);
            }
        }
        Ok(())
    }

    /// Extension claim value
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    /// Remove an extension claim
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.extra.remove(name)
    }

    /// Extension claims in key order
    #[must_use]
    pub fn extensions(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    /// `iss`
    #[must_use]
    pub fn issuer(&self) -> Option<&str> {
        self.iss.as_deref()
    }

    /// Set `iss`, replacing any previous value
    pub fn set_issuer(&mut self, iss: impl Into<String>) {
        self.iss = Some(iss.into());
    }

    /// Delete `iss`
    pub fn remove_issuer(&mut self) {
        self.iss = None;
    }

    /// `sub`
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref()
    }

    /// Set `sub`, replacing any previous value
    pub fn set_subject(&mut self, sub: impl Into<String>) {
        self.sub = Some(sub.into());
    }

    /// Delete `sub`
    pub fn remove_subject(&mut self) {
        self.sub = None;
    }

    /// `aud` as a list; empty when absent
    #[must_use]
    pub fn audience(&self) -> Vec<String> {
        self.aud.as_ref().map(Audience::to_vec).unwrap_or_default()
    }

    /// Set `aud`, replacing any previous value
    pub fn set_audience(&mut self, aud: impl Into<Audience>) {
        self.aud = Some(aud.into());
    }

    /// Delete `aud`
    pub fn remove_audience(&mut self) {
        self.aud = None;
    }

    /// `exp`, 0 when absent or not an integer
    #[must_use]
    pub fn expiration_time(&self) -> i64 {
        read_time("exp", self.exp.as_ref())
    }

    /// Set `exp`
    pub fn set_expiration_time(&mut self, exp: i64) {
        self.exp = Some(exp.into());
    }

    /// Set `exp` relative to now
    pub fn expires_in(&mut self, dur: Duration) {
        self.exp = Some((Utc::now() + dur).timestamp().into());
    }

    /// `exp` as a timestamp
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp
            .as_ref()
            .and_then(NumericDate::seconds)
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Delete `exp`
    pub fn remove_expiration_time(&mut self) {
        self.exp = None;
    }

    /// `nbf`, 0 when absent or not an integer
    #[must_use]
    pub fn not_before(&self) -> i64 {
        read_time("nbf", self.nbf.as_ref())
    }

    /// Set `nbf`
    pub fn set_not_before(&mut self, nbf: i64) {
        self.nbf = Some(nbf.into());
    }

    /// Delete `nbf`
    pub fn remove_not_before(&mut self) {
        self.nbf = None;
    }

    /// `iat`, 0 when absent or not an integer
    #[must_use]
    pub fn issued_at(&self) -> i64 {
        read_time("iat", self.iat.as_ref())
    }

    /// Set `iat`
    pub fn set_issued_at(&mut self, iat: i64) {
        self.iat = Some(iat.into());
    }

    /// Set `iat` to the current time
    pub fn issued_now(&mut self) {
        self.iat = Some(Utc::now().timestamp().into());
    }

    /// Delete `iat`
    pub fn remove_issued_at(&mut self) {
        self.iat = None;
    }

    /// `jti`
    #[must_use]
    pub fn token_id(&self) -> Option<&str> {
        self.jti.as_deref()
    }

    /// Set `jti`, replacing any previous value
    pub fn set_token_id(&mut self, jti: impl Into<String>) {
        self.jti = Some(jti.into());
    }

    /// Delete `jti`
    pub fn remove_token_id(&mut self) {
        self.jti = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn registered_names_go_to_typed_fields() {
        let mut claims = Claims::new();
        claims.insert("exp", 1_300_819_380).unwrap();
        claims.insert("aud", json!(["a", "b"])).unwrap();
        claims.insert("http://example.com/is_root", true).unwrap();

        assert_eq!(claims.expiration_time(), 1_300_819_380);
        assert_eq!(claims.audience(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(claims.get("exp"), None);
        assert_eq!(claims.get("http://example.com/is_root"), Some(&json!(true)));
    }

    #[test]
    fn malformed_time_claim_reads_as_zero() {
        let mut claims = Claims::new();
        claims.insert("nbf", "yesterday").unwrap();
        assert_eq!(claims.not_before(), 0);
        assert_eq!(
            claims.nbf.as_ref().map(NumericDate::as_value),
            Some(&json!("yesterday"))
        );

        let encoded = serde_json::to_value(&claims).unwrap();
        assert_eq!(encoded, json!({"nbf": "yesterday"}));
    }

    #[test]
    fn wrongly_typed_string_claim_is_rejected() {
        let mut claims = Claims::new();
        assert!(claims.insert("iss", 42).is_err());
        assert_eq!(claims.issuer(), None);
    }

    #[test]
    fn null_time_claim_survives_a_round_trip() {
        let claims: Claims = serde_json::from_value(json!({"iat": null})).unwrap();
        assert_eq!(claims.issued_at(), 0);
        assert_eq!(serde_json::to_string(&claims).unwrap(), r#"{"iat":null}"#);
    }

    #[test]
    fn extension_claims_can_be_listed_and_removed() {
        let mut claims = Claims::new();
        claims.insert("b", 2).unwrap();
        claims.insert("a", 1).unwrap();
        claims.set_issuer("joe");

        let names: Vec<&str> = claims.extensions().keys().map(String::as_str).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(claims.remove("a"), Some(json!(1)));
        assert_eq!(claims.remove("a"), None);
        assert_eq!(claims.get("b"), Some(&json!(2)));
    }

    #[test]
    fn encoding_is_stable() {
        let mut claims = Claims::new();
        claims.insert("zeta", 1).unwrap();
        claims.insert("alpha", 2).unwrap();
        claims.set_subject("alice");
        claims.set_issuer("joe");

        let encoded = serde_json::to_string(&claims).unwrap();
        assert_eq!(encoded, r#"{"iss":"joe","sub":"alice","alpha":2,"zeta":1}"#);

        let decoded: Claims = serde_json::from_str(&encoded).unwrap();
        assert_eq!(serde_json::to_string(&decoded).unwrap(), encoded);
    }
}
