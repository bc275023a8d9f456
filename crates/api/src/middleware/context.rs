//! Typed request extensions and their extractors.
//!
//! The loader middleware inserts these into the request; handlers extract
//! them by type. Extracting [`CurrentUser`] or [`CurrentBlog`] on a route
//! that is not behind the corresponding loader-plus-gate stack is a routing
//! bug, and the extractor panics so the mistake fails loudly in tests
//! (the panic-catching layer turns it into a 500 in production).

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use quill_core::types::DbId;
use quill_db::models::user::User;

/// The authenticated user for this request. Present on any route behind
/// `load_user` + `require_login::<true>`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// The authenticated user's blog, reduced to what the gates need. Present
/// on any route behind `load_blog` + `require_blog::<true>`.
#[derive(Debug, Clone, Copy)]
pub struct CurrentBlog {
    pub id: DbId,
    pub verified: bool,
}

/// The user if logged in, `None` otherwise. Usable on any route behind
/// `load_user`, gated or not.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<User>);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<CurrentUser>() {
            Some(user) => Ok(user.clone()),
            None => panic!("CurrentUser extracted on a route without a login gate"),
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentBlog {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<CurrentBlog>() {
            Some(blog) => Ok(*blog),
            None => panic!("CurrentBlog extracted on a route without a blog gate"),
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for OptionalUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalUser(
            parts.extensions.get::<CurrentUser>().map(|u| u.0.clone()),
        ))
    }
}
