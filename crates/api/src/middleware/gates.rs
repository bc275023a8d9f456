//! Gate middleware: redirect requests that do not match a route's
//! authentication requirements.
//!
//! Each gate is parameterized by the state it EXPECTS, so the same function
//! guards both sides: `require_login::<true>` protects logged-in pages and
//! `require_login::<false>` bounces logged-in users off the login form.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::middleware::context::{CurrentBlog, CurrentUser};

/// Where a logged-out user lands when hitting a protected route.
const LOGIN_PATH: &str = "/login";

/// The logged-in landing page.
const DASHBOARD_PATH: &str = "/site";

/// Where a blog-less user is sent to create one.
const NEW_BLOG_PATH: &str = "/new-blog";

/// Holding page for users whose blog is awaiting verification.
const BLOG_UNVERIFIED_PATH: &str = "/site/blog-unverified";

/// Require the request's login state to equal `EXPECT`.
pub async fn require_login<const EXPECT: bool>(req: Request, next: Next) -> Response {
    let logged_in = req.extensions().get::<CurrentUser>().is_some();
    if logged_in != EXPECT {
        let target = if EXPECT { LOGIN_PATH } else { DASHBOARD_PATH };
        return Redirect::to(target).into_response();
    }

    next.run(req).await
}

/// Require the user's blog-existence state to equal `EXPECT`. Sits inside
/// a login gate, after `load_blog`.
pub async fn require_blog<const EXPECT: bool>(req: Request, next: Next) -> Response {
    let has_blog = req.extensions().get::<CurrentBlog>().is_some();
    if has_blog != EXPECT {
        let target = if EXPECT { NEW_BLOG_PATH } else { DASHBOARD_PATH };
        return Redirect::to(target).into_response();
    }

    next.run(req).await
}

/// Require the blog's verification state to equal `EXPECT`. Sits inside
/// `require_blog::<true>`; reaching it without a blog attached is a
/// routing bug and panics.
pub async fn require_blog_verified<const EXPECT: bool>(req: Request, next: Next) -> Response {
    let blog = req
        .extensions()
        .get::<CurrentBlog>()
        .copied()
        .unwrap_or_else(|| panic!("require_blog_verified reached without a blog gate"));

    if blog.verified != EXPECT {
        let target = if EXPECT {
            BLOG_UNVERIFIED_PATH
        } else {
            DASHBOARD_PATH
        };
        return Redirect::to(target).into_response();
    }

    next.run(req).await
}
