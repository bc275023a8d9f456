//! Opaque high-entropy tokens.
//!
//! The same primitive backs both session tokens and email-verification
//! tokens; only the table a token lands in gives it meaning. A token is the
//! lowercase-hex encoding of 32 bytes drawn from the operating system's
//! CSPRNG, so authenticity rests entirely on unguessability plus a
//! server-side lookup on every request.

use rand::rngs::OsRng;
use rand::TryRngCore;
use serde::{Deserialize, Serialize};

/// Number of random bytes per token (256 bits of entropy).
const TOKEN_BYTES: usize = 32;

/// An opaque, hex-encoded random identifier (64 hex characters).
///
/// Immutable once created. There is no signing or encryption layer on top;
/// the value on the wire is exactly the hex string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Generate a fresh token from the OS entropy source.
    ///
    /// Panics if the entropy source cannot supply bytes. That is an
    /// environment fault, not a recoverable error.
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .unwrap_or_else(|e| panic!("error reading bytes for token: {e}"));

        Token(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Token {
    /// Wrap an inbound value (cookie or URL path segment) as a token.
    ///
    /// No validation happens here; a malformed value simply never matches a
    /// stored row.
    fn from(value: String) -> Self {
        Token(value)
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}
