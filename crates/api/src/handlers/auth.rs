//! Signup, verification, login, and logout handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect};
use axum::Json;
use axum_extra::extract::CookieJar;
use quill_core::token::Token;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::session::{removal_cookie, session_cookie};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub net_id: String,
    pub name: String,
    pub password: String,
    pub password_confirm: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub net_id: String,
    pub password: String,
}

/// `POST /signup`: create an account and issue its verification email.
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = state
        .auth()
        .signup(&body.net_id, &body.name, &body.password, &body.password_confirm)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "email": outcome.email,
            "name": outcome.user.name,
        })),
    ))
}

/// `GET /signup/verify/{token}`: consume a verification token, then send
/// the browser to the login form.
pub async fn verify_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Redirect, AppError> {
    state.auth().verify(&Token::from(token)).await?;
    Ok(Redirect::to("/login"))
}

/// `POST /login`: authenticate and set the session cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (user, session) = state.auth().login(&body.net_id, &body.password).await?;

    let jar = jar.add(session_cookie(&session));
    Ok((
        jar,
        Json(json!({
            "net_id": user.net_id,
            "name": user.name,
        })),
    ))
}

/// `POST /logout`: clear the session cookie.
///
/// The server-side row is left to expire on its own; clearing the cookie is
/// what ends the browser's session.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (jar.add(removal_cookie()), StatusCode::NO_CONTENT)
}
