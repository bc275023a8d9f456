//! Route tree and gate placement.
//!
//! Route hierarchy (gates in brackets):
//!
//! ```text
//! /                              index (public)
//!
//! /login                         GET form, POST login      [logged out]
//! /signup                        GET form, POST signup     [logged out]
//! /signup/verify/{token}         GET consume token         [logged out]
//!
//! /logout                        POST clear cookie         [logged in]
//! /new-blog                      GET prompt, POST create   [logged in, no blog]
//! /site                          GET dashboard             [logged in, blog, verified]
//! /site/blog-unverified          GET holding page          [logged in, blog, unverified]
//! ```

pub mod health;

use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{auth, blogs, pages};
use crate::middleware::gates::{require_blog, require_blog_verified, require_login};
use crate::middleware::session::load_blog;
use crate::state::AppState;

/// Routes open to everyone, logged in or not.
fn public_routes() -> Router<AppState> {
    Router::new().route("/", get(pages::index))
}

/// Routes reserved for anonymous visitors; logged-in users bounce to the
/// dashboard.
fn anonymous_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(pages::login_page).post(auth::login))
        .route("/signup", get(pages::signup_page).post(auth::signup))
        .route("/signup/verify/{token}", get(auth::verify_email))
        .layer(from_fn(require_login::<false>))
}

/// Routes behind the login gate. `load_blog` runs inside the gate so the
/// inner blog gates can see [`crate::middleware::context::CurrentBlog`].
fn authenticated_routes(state: AppState) -> Router<AppState> {
    let no_blog = Router::new()
        .route(
            "/new-blog",
            get(blogs::new_blog_prompt).post(blogs::create_blog),
        )
        .layer(from_fn(require_blog::<false>));

    let verified_blog = Router::new()
        .route("/site", get(blogs::dashboard))
        .layer(from_fn(require_blog_verified::<true>))
        .layer(from_fn(require_blog::<true>));

    let unverified_blog = Router::new()
        .route("/site/blog-unverified", get(blogs::unverified_notice))
        .layer(from_fn(require_blog_verified::<false>))
        .layer(from_fn(require_blog::<true>));

    Router::new()
        .route("/logout", post(auth::logout))
        .merge(no_blog)
        .merge(verified_blog)
        .merge(unverified_blog)
        .layer(from_fn_with_state(state, load_blog))
        .layer(from_fn(require_login::<true>))
}

/// The full gated route tree (everything except `/health`).
pub fn app_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(public_routes())
        .merge(anonymous_routes())
        .merge(authenticated_routes(state))
}
