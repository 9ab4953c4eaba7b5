use crypto::hmac::Hmac;
use crypto::mac::{Mac, MacResult};
use crypto::sha2::Sha256;
use rustc_serialize::base64::{FromBase64, ToBase64, URL_SAFE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::json;
use crate::verifier::{self, Verifier};
use crate::HEADER;


/// A decoded token payload: a JSON object with arbitrary values.
///
/// `nbf` and `exp`, when present and numeric, are Unix timestamps in
/// seconds and are checked by `decode`. They are returned untouched.
/// Key order follows the token text.
pub type Payload = Map<String, Value>;


/// Encode `payload` into a signed `<payload>.<signature>` token.
///
/// The payload must be a JSON object; anything else, including `null` and
/// arrays, is rejected with `PayloadInvalid`. The key must not be empty.
pub fn encode(payload: &Value, key: &str) -> Result<String> {
    if !payload.is_object() {
        return Err(Error::PayloadInvalid);
    }
    if key.is_empty() {
        return Err(Error::KeyRequired);
    }

    let encoded = json::to_vec(payload)?.to_base64(URL_SAFE);
    let signature = sign(&encoded, key);

    trace!(len = encoded.len(), "encoded token payload");

    Ok(format!("{}.{}", encoded, signature))
}

/// Encode any value that serializes to a JSON object.
pub fn encode_claims<T: Serialize>(claims: &T, key: &str) -> Result<String> {
    let payload = serde_json::to_value(claims).or(Err(Error::PayloadInvalid))?;
    encode(&payload, key)
}


/// Verify `token` against `key` and return its payload.
///
/// Accepts both `<payload>.<signature>` and tokens carrying a leading
/// header segment; only the last two segments are significant and the
/// signature is always recomputed over the fixed `HEADER`.
///
/// Checks run in a fixed order and the first failure is returned:
/// `TokenRequired`, `KeyRequired`, `TokenInvalid`, `SignatureFailed`,
/// `TokenExpired`, `TokenNotYetActive`.
pub fn decode(token: &str, key: &str) -> Result<Payload> {
    decode_at(token, key, verifier::now())
}

/// As `decode`, but evaluating `exp` and `nbf` at the given Unix time.
pub fn decode_at(token: &str, key: &str, now: u64) -> Result<Payload> {
    if token.is_empty() {
        return Err(Error::TokenRequired);
    }
    if key.is_empty() {
        return Err(Error::KeyRequired);
    }

    let (encoded, signature) = extract_segments(token)?;

    // Always compare signatures using equality operators that are
    // resistant to timing attacks.
    let expected = sign(encoded, key);
    if MacResult::new(expected.as_bytes()) != MacResult::new(signature.as_bytes()) {
        debug!("token signature mismatch");
        return Err(Error::SignatureFailed);
    }

    let payload = parse_payload(encoded)?;
    Verifier::at_time(&payload, now).check()?;

    Ok(payload)
}

/// Decode a token and convert its payload into `T`.
///
/// A verified payload that does not fit `T` is reported as `TokenInvalid`.
pub fn decode_claims<T: DeserializeOwned>(token: &str, key: &str) -> Result<T> {
    let payload = decode(token, key)?;
    serde_json::from_value(Value::Object(payload)).or(Err(Error::TokenInvalid))
}


/// Split off the encoded payload and signature, discarding anything in
/// front of them.
fn extract_segments(token: &str) -> Result<(&str, &str)> {
    let mut segments = token.rsplit('.');

    let signature = segments.next().unwrap_or("");
    let encoded = segments.next().unwrap_or("");

    if encoded.is_empty() || signature.is_empty() {
        debug!(segments = token.split('.').count(), "malformed token");
        return Err(Error::TokenInvalid);
    }

    Ok((encoded, signature))
}

fn parse_payload(encoded: &str) -> Result<Payload> {
    let bytes = encoded.from_base64().or(Err(Error::TokenInvalid))?;

    json::object_from_slice(&bytes).map_err(|err| {
        debug!("signed payload is not a JSON object");
        err
    })
}

/// HMAC-SHA256 over `<HEADER>.<encoded>`, base64url encoded.
fn sign(encoded: &str, key: &str) -> String {
    let mut mac = Hmac::new(Sha256::new(), key.as_bytes());
    mac.input(HEADER.as_bytes());
    mac.input(b".");
    mac.input(encoded.as_bytes());
    mac.result().code().to_base64(URL_SAFE)
}
