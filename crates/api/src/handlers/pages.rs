//! Public pages.

use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::middleware::context::OptionalUser;

/// `GET /`: the landing page, aware of login state but open to everyone.
pub async fn index(OptionalUser(user): OptionalUser) -> impl IntoResponse {
    match user {
        Some(user) => Json(json!({ "logged_in": true, "name": user.name })),
        None => Json(json!({ "logged_in": false })),
    }
}

/// `GET /login`: the login form placeholder for anonymous visitors.
pub async fn login_page() -> impl IntoResponse {
    Json(json!({ "message": "Log in with your net id and password." }))
}

/// `GET /signup`: the signup form placeholder for anonymous visitors.
pub async fn signup_page() -> impl IntoResponse {
    Json(json!({ "message": "Sign up with your net id." }))
}
