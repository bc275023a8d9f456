//! Session cookie codec.
//!
//! The cookie value is exactly the hex session token; there is no signing
//! or encryption layer. Authenticity rests on the token being unguessable
//! and validated against the server-side row on every request.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use quill_core::session::Session;
use quill_core::token::Token;
use quill_core::types::Timestamp;
use time::OffsetDateTime;

/// Session cookie name. The version suffix allows a clean break if the
/// cookie contract ever changes.
pub const SESSION_COOKIE: &str = "quill_session_token_v1";

/// Sentinel value written when instructing the browser to drop the cookie.
const DELETED: &str = "deleted";

fn expiration(at: Timestamp) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(at.timestamp()).unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

fn base_cookie(value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, value);
    cookie.set_path("/");
    cookie.set_secure(true);
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Strict);
    cookie
}

/// Serialize a session into its browser cookie: `Path=/`, `Secure`,
/// `HttpOnly`, `SameSite=Strict`, expiring with the session.
pub fn session_cookie(session: &Session) -> Cookie<'static> {
    let mut cookie = base_cookie(session.token.as_str().to_string());
    cookie.set_expires(expiration(session.expires_at));
    cookie
}

/// A cookie that overwrites the session with a sentinel and an
/// already-past expiry, instructing the browser to drop it immediately.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = base_cookie(DELETED.to_string());
    cookie.set_expires(OffsetDateTime::UNIX_EPOCH);
    cookie
}

/// Read the session token from the request's cookies.
///
/// Absence (or the sentinel left by [`removal_cookie`]) is a normal
/// anonymous request, not an error. A malformed value simply never matches
/// a stored session row.
pub fn session_token(jar: &CookieJar) -> Option<Token> {
    let value = jar.get(SESSION_COOKIE)?.value();
    if value.is_empty() || value == DELETED {
        return None;
    }

    Some(Token::from(value.to_string()))
}
