//! Compact signed tokens.
//!
//! A token is `<payload>.<signature>`, where `payload` is the base64url
//! (unpadded) encoding of a JSON object and `signature` is the base64url
//! encoded HMAC-SHA256, keyed with a caller supplied secret, of
//! `<HEADER>.<payload>`.
//!
//! The header is never transmitted: it is the fixed value `HEADER` and is
//! always reconstructed when verifying. Prefixing a token with it gives a
//! standard three part JWT, which `decode` also accepts.
//!
//! Two payload fields are understood: `exp` (expiry) and `nbf` (not
//! before), both Unix timestamps in seconds. All other fields are opaque.
//!
//! Payloads are serialized the way `JSON.stringify` would: keys in
//! insertion order, floats without a trailing `.0`.
//!
//! ```
//! use kequjwt::{decode, encode, Error};
//! use serde_json::{json, Value};
//!
//! let payload = json!({"hello": "world1"});
//! let token = encode(&payload, "secret1").unwrap();
//! assert_eq!(token, "eyJoZWxsbyI6IndvcmxkMSJ9.aGKCoDnKydHynAU05v0Qzje-wo_gKTy18eFLoOLQJWM");
//!
//! assert_eq!(Value::Object(decode(&token, "secret1").unwrap()), payload);
//! assert_eq!(decode(&token, "secret2"), Err(Error::SignatureFailed));
//! ```

extern crate crypto;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate quick_error;
extern crate rustc_serialize;
extern crate serde;
extern crate serde_json;
#[macro_use]
extern crate tracing;

use rustc_serialize::base64::{ToBase64, URL_SAFE};

mod error;
mod json;
mod token;
mod verifier;

pub use error::{Error, Result};
pub use token::{decode, decode_at, decode_claims, encode, encode_claims, Payload};
pub use verifier::{now, Verifier};


/// The JSON text of the implicit token header.
pub const HEADER_JSON: &str = r#"{"typ":"JWT","alg":"HS256"}"#;

lazy_static! {
    /// base64url encoding of `HEADER_JSON`:
    /// `eyJ0eXAiOiJKV1QiLCJhbGciOiJIUzI1NiJ9`.
    pub static ref HEADER: String = HEADER_JSON.as_bytes().to_base64(URL_SAFE);
}

/// The implicit token header, see `HEADER`.
pub fn header() -> &'static str {
    &HEADER
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_header() {
        assert_eq!(header(), "eyJ0eXAiOiJKV1QiLCJhbGciOiJIUzI1NiJ9");
        assert_eq!(*HEADER, "eyJ0eXAiOiJKV1QiLCJhbGciOiJIUzI1NiJ9");
    }

    #[test]
    fn concurrent_use() {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                std::thread::spawn(move || {
                    let key = format!("secret{}", i);
                    let payload = serde_json::json!({ "thread": i });
                    let token = encode(&payload, &key).unwrap();
                    decode(&format!("{}.{}", header(), token), &key).unwrap()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let payload = handle.join().unwrap();
            assert_eq!(payload.get("thread").and_then(|v| v.as_u64()), Some(i as u64));
        }
    }
}
