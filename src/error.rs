use std::result;


quick_error! {
    /// The reason a token could not be produced or accepted.
    ///
    /// Each kind carries a fixed message and never wraps a lower level
    /// cause, so callers are expected to match on the variant rather than
    /// on the text.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Error {
        /// The payload handed to `encode` was not a JSON object.
        PayloadInvalid {
            display("Payload must be an object")
        }

        /// The key was empty.
        KeyRequired {
            display("Key is required")
        }

        /// The token handed to `decode` was empty.
        TokenRequired {
            display("Token is required")
        }

        /// The token did not contain an encoded payload and a signature,
        /// or the signed payload was not a JSON object.
        TokenInvalid {
            display("Token format invalid")
        }

        /// The signature did not match the payload under the given key.
        SignatureFailed {
            display("Signature verification failed")
        }

        /// `exp` has been reached.
        TokenExpired {
            display("Token expired")
        }

        /// `nbf` lies in the future.
        TokenNotYetActive {
            display("Token not yet active")
        }
    }
}

impl Error {
    /// Every error kind: the `encode` checks, then the remaining `decode`
    /// checks in the order `decode` runs them.
    pub const ALL: [Error; 7] = [
        Error::PayloadInvalid,
        Error::KeyRequired,
        Error::TokenRequired,
        Error::TokenInvalid,
        Error::SignatureFailed,
        Error::TokenExpired,
        Error::TokenNotYetActive,
    ];
}


pub type Result<T> = result::Result<T, Error>;
