//! The session value: a capability token plus an absolute expiry.
//!
//! A session lives in two places at once: a server-side row keyed by the
//! token, and the browser's cookie. Either side dropping it is a normal way
//! for the session to end; the server never actively prunes expired rows,
//! it just treats them as invalid on lookup.

use chrono::{Duration, Utc};

use crate::token::Token;
use crate::types::Timestamp;

/// Session lifetime from creation.
pub const SESSION_TTL_HOURS: i64 = 48;

/// A logged-in session: opaque token + absolute expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: Token,
    pub expires_at: Timestamp,
}

impl Session {
    /// Mint a new session expiring [`SESSION_TTL_HOURS`] from now.
    ///
    /// A session is valid iff a server-side row with its token exists and
    /// `expires_at` has not passed; the row's expiry check happens at
    /// lookup, on every request, since validity is time-dependent.
    pub fn new() -> Self {
        Session {
            token: Token::generate(),
            expires_at: Utc::now() + Duration::hours(SESSION_TTL_HOURS),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
