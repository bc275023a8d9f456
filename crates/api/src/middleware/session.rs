//! Loader middleware: cookie to user, user to blog.

use axum::extract::{Request, State};
use axum::http::header::SET_COOKIE;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use crate::error::AppError;
use crate::middleware::context::{CurrentBlog, CurrentUser};
use crate::services::blogs::BlogError;
use crate::services::users::AuthError;
use crate::session::removal_cookie;
use crate::state::AppState;

/// Resolve the session cookie to a user and attach [`CurrentUser`].
///
/// Runs on every request. An absent cookie is a normal anonymous request.
/// A cookie naming a missing or expired session, or a session whose user
/// row is gone, is also treated as anonymous, and the response additionally
/// instructs the browser to drop the dead cookie. Only infrastructure
/// failures abort the request.
pub async fn load_user(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = crate::session::session_token(&jar) else {
        return Ok(next.run(req).await);
    };

    match state.auth().load_session(&token).await {
        Ok(user) => {
            req.extensions_mut().insert(CurrentUser(user));
            Ok(next.run(req).await)
        }
        Err(
            AuthError::SessionDoesNotExist
            | AuthError::SessionExpired
            | AuthError::UserDoesNotExist,
        ) => {
            tracing::debug!("dead session cookie, clearing");
            let mut response = next.run(req).await;
            if let Ok(value) = HeaderValue::from_str(&removal_cookie().to_string()) {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Ok(response)
        }
        Err(err) => Err(AppError::Auth(err)),
    }
}

/// Attach [`CurrentBlog`] for the already-authenticated user.
///
/// Must sit inside `require_login::<true>`; the user having no blog is
/// normal (the gates decide whether that matters for the route).
pub async fn load_blog(
    State(state): State<AppState>,
    user: CurrentUser,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    match state.blogs().load_blog_from_user(user.0.id).await {
        Ok(site) => {
            req.extensions_mut().insert(CurrentBlog {
                id: site.id,
                verified: site.is_verified(),
            });
            Ok(next.run(req).await)
        }
        Err(BlogError::BlogDoesNotExist) => Ok(next.run(req).await),
        Err(err) => Err(AppError::Blog(err)),
    }
}
