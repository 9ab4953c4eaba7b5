use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use crate::error::{Error, Result};
use crate::token::Payload;


/// The current Unix time in whole seconds.
///
/// A clock set before the epoch reads as zero.
pub fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}


/// Checks the `exp` and `nbf` claims of an already authenticated payload.
///
/// Either claim is only considered when it is present *and* numeric; any
/// other value is treated as absent. Expiry is always checked before
/// not-before, so a payload failing both reports `TokenExpired`.
pub struct Verifier<'a> {
    payload: &'a Payload,
    now: u64,
}

impl<'a> Verifier<'a> {
    /// Create a verifier for `payload` using the system clock.
    pub fn new(payload: &'a Payload) -> Verifier<'a> {
        Verifier::at_time(payload, now())
    }

    /// Create a verifier for `payload` evaluated at the given Unix time.
    pub fn at_time(payload: &'a Payload, now: u64) -> Verifier<'a> {
        Verifier { payload, now }
    }

    /// Evaluate the claims at the given Unix time instead of now.
    pub fn at(&mut self, now: u64) -> &mut Self {
        self.now = now;
        self
    }

    /// The `exp` claim, if present and numeric.
    pub fn expires(&self) -> Option<f64> {
        numeric_claim(self.payload, "exp")
    }

    /// The `nbf` claim, if present and numeric.
    pub fn not_before(&self) -> Option<f64> {
        numeric_claim(self.payload, "nbf")
    }

    pub fn check(&self) -> Result<()> {
        let now = self.now as f64;

        if let Some(exp) = self.expires() {
            if now >= exp {
                debug!(now = self.now, "token expired");
                return Err(Error::TokenExpired);
            }
        }

        if let Some(nbf) = self.not_before() {
            if now < nbf {
                debug!(now = self.now, "token not yet active");
                return Err(Error::TokenNotYetActive);
            }
        }

        Ok(())
    }
}


fn numeric_claim(payload: &Payload, name: &str) -> Option<f64> {
    // `as_f64` is `None` for anything but numbers.
    payload.get(name).and_then(Value::as_f64)
}
