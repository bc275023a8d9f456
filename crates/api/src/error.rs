//! HTTP-facing error translation.
//!
//! Services return their own error enums; this module decides the status
//! code and client-visible message for each. Infrastructure failures are
//! logged with full detail and answered with a generic 500 body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::services::blogs::BlogError;
use crate::services::users::AuthError;

/// Login failures collapse to one message so responses do not reveal
/// whether a net id is registered.
const LOGIN_FAILED: &str = "No user account found with that net id and password.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Blog(#[from] BlogError),
}

impl AppError {
    /// Status code, machine-readable code, client message.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Auth(err) => match err {
                AuthError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "validation", msg.clone())
                }
                AuthError::UserExists => (
                    StatusCode::CONFLICT,
                    "user_exists",
                    "A user with that net id already exists.".into(),
                ),
                AuthError::UserDoesNotExist | AuthError::WrongPassword => {
                    (StatusCode::UNAUTHORIZED, "login_failed", LOGIN_FAILED.into())
                }
                AuthError::UserNotVerified => (
                    StatusCode::FORBIDDEN,
                    "user_not_verified",
                    "Please verify your email before logging in.".into(),
                ),
                AuthError::TokenNotFound => (
                    StatusCode::NOT_FOUND,
                    "token_not_found",
                    "Verification token not found.".into(),
                ),
                AuthError::TokenExpired => (
                    StatusCode::BAD_REQUEST,
                    "token_expired",
                    "Verification token has expired. Please sign up again.".into(),
                ),
                AuthError::SessionDoesNotExist | AuthError::SessionExpired => (
                    StatusCode::UNAUTHORIZED,
                    "session_invalid",
                    "Your session is no longer valid. Please log in again.".into(),
                ),
                AuthError::CorruptHash(_) | AuthError::Db(_) | AuthError::Mail(_) => {
                    internal(err)
                }
            },
            AppError::Blog(err) => match err {
                BlogError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "validation", msg.clone())
                }
                BlogError::SubdomainNotAvailable => (
                    StatusCode::CONFLICT,
                    "subdomain_taken",
                    "That subdomain is not available.".into(),
                ),
                BlogError::BlogDoesNotExist => (
                    StatusCode::NOT_FOUND,
                    "blog_not_found",
                    "No blog exists for this account.".into(),
                ),
                BlogError::Db(_) => internal(err),
            },
        }
    }
}

fn internal(err: &dyn std::error::Error) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %err, "internal error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal",
        "Something went wrong. Please try again later.".into(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        (status, Json(json!({ "error": message, "code": code }))).into_response()
    }
}
