//! HTTP-level integration tests for the account lifecycle: signup, email
//! verification, login, session cookies, and logout.

mod common;

use std::sync::Arc;

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use common::{
    body_json, build_test_app, cookie_pair, get, get_with_cookie, post_json,
    post_json_with_cookie, set_cookie, test_config,
};
use quill_api::mailer::{LogMailer, Mailer};
use quill_api::services::users::{AuthError, AuthService};
use quill_core::token::Token;
use sqlx::PgPool;

const PASSWORD: &str = "a-dozen-chars";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Sign up a user through the API and return the verification token that
/// was issued for them.
async fn signup_user(pool: &PgPool, app: axum::Router, net_id: &str) -> String {
    let body = serde_json::json!({
        "net_id": net_id,
        "name": "Jane Doe",
        "password": PASSWORD,
        "password_confirm": PASSWORD,
    });
    let response = post_json(app, "/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let token: (String,) = sqlx::query_as(
        "SELECT t.token FROM email_tokens t JOIN users u ON u.id = t.user_id
         WHERE u.net_id = $1",
    )
    .bind(net_id)
    .fetch_one(pool)
    .await
    .expect("verification token should exist");
    token.0
}

/// Sign up and verify a user, ready to log in.
async fn signup_verified_user(pool: &PgPool, app: axum::Router, net_id: &str) {
    let token = signup_user(pool, app.clone(), net_id).await;
    let response = get(app, &format!("/signup/verify/{token}")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

/// Log in through the API and return the session cookie pair.
async fn login_user(app: axum::Router, net_id: &str) -> String {
    let body = serde_json::json!({ "net_id": net_id, "password": PASSWORD });
    let response = post_json(app, "/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let header = set_cookie(&response).expect("login must set the session cookie");
    cookie_pair(&header)
}

/// Build the auth service directly, for asserting on error kinds the
/// middleware would otherwise collapse.
fn auth_service(pool: PgPool) -> AuthService {
    let config = test_config();
    let mailer: Arc<dyn Mailer> = Arc::new(LogMailer {
        scheme: config.scheme().to_string(),
        base_domain: config.base_domain.clone(),
    });
    AuthService::new(pool, mailer, Arc::new(config))
}

// ---------------------------------------------------------------------------
// Signup
// ---------------------------------------------------------------------------

/// Signup returns 201 with the institutional email derived from the net id.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_success(pool: PgPool) {
    let app = build_test_app(pool);

    let body = serde_json::json!({
        "net_id": "jdoe",
        "name": "Jane Doe",
        "password": PASSWORD,
        "password_confirm": PASSWORD,
    });
    let response = post_json(app, "/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["email"], "jdoe@test.edu");
    assert_eq!(json["name"], "Jane Doe");
}

/// A second signup with the same net id returns 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_duplicate_net_id(pool: PgPool) {
    let app = build_test_app(pool.clone());
    signup_user(&pool, app.clone(), "jdoe").await;

    let body = serde_json::json!({
        "net_id": "jdoe",
        "name": "Someone Else",
        "password": PASSWORD,
        "password_confirm": PASSWORD,
    });
    let response = post_json(app, "/signup", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "user_exists");
}

/// Validation failures return 400 with the user-facing message.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_rejects_short_password(pool: PgPool) {
    let app = build_test_app(pool);

    let body = serde_json::json!({
        "net_id": "jdoe",
        "name": "Jane Doe",
        "password": "elevenchars",
        "password_confirm": "elevenchars",
    });
    let response = post_json(app, "/signup", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "validation");
}

// ---------------------------------------------------------------------------
// Email verification
// ---------------------------------------------------------------------------

/// Logging in with correct credentials before verifying returns 403.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_before_verification(pool: PgPool) {
    let app = build_test_app(pool.clone());
    signup_user(&pool, app.clone(), "jdoe").await;

    let body = serde_json::json!({ "net_id": "jdoe", "password": PASSWORD });
    let response = post_json(app, "/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "user_not_verified");
}

/// Consuming the verification token redirects to the login form and
/// unlocks login.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_verify_then_login(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let token = signup_user(&pool, app.clone(), "jdoe").await;

    let response = get(app.clone(), &format!("/signup/verify/{token}")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/login");

    let body = serde_json::json!({ "net_id": "jdoe", "password": PASSWORD });
    let response = post_json(app, "/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json_cookie = set_cookie(&response).expect("session cookie must be set");
    assert!(json_cookie.starts_with("quill_session_token_v1="));
    assert!(json_cookie.contains("HttpOnly"));
    assert!(json_cookie.contains("SameSite=Strict"));
}

/// An unknown verification token returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_verify_unknown_token(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(app, "/signup/verify/not-a-real-token").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// An expired verification token returns 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_verify_expired_token(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let token = signup_user(&pool, app.clone(), "jdoe").await;

    sqlx::query("UPDATE email_tokens SET expires_at = now() - interval '1 hour'")
        .execute(&pool)
        .await
        .expect("expiry update should succeed");

    let response = get(app, &format!("/signup/verify/{token}")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "token_expired");
}

/// Re-presenting an already-consumed token verifies again harmlessly.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_verify_token_replay_is_idempotent(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let token = signup_user(&pool, app.clone(), "jdoe").await;

    for _ in 0..2 {
        let response = get(app.clone(), &format!("/signup/verify/{token}")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }
}

// ---------------------------------------------------------------------------
// Login and sessions
// ---------------------------------------------------------------------------

/// Wrong password and unknown net id are indistinguishable 401s.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_failures_are_uniform(pool: PgPool) {
    let app = build_test_app(pool.clone());
    signup_verified_user(&pool, app.clone(), "jdoe").await;

    let wrong_pw = serde_json::json!({ "net_id": "jdoe", "password": "incorrect-password" });
    let response = post_json(app.clone(), "/login", wrong_pw).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let wrong_pw_body = body_json(response).await;

    let no_user = serde_json::json!({ "net_id": "ghost", "password": "incorrect-password" });
    let response = post_json(app, "/login", no_user).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let no_user_body = body_json(response).await;

    assert_eq!(wrong_pw_body, no_user_body);
}

/// The session cookie resolves back to its user on later requests.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_session_resolves_user(pool: PgPool) {
    let app = build_test_app(pool.clone());
    signup_verified_user(&pool, app.clone(), "jdoe").await;
    let cookie = login_user(app.clone(), "jdoe").await;

    let response = get_with_cookie(app, "/", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["logged_in"], true);
    assert_eq!(json["name"], "Jane Doe");
}

/// An expired session is treated as anonymous, and the response tells the
/// browser to drop the dead cookie.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_expired_session_is_cleared(pool: PgPool) {
    let app = build_test_app(pool.clone());
    signup_verified_user(&pool, app.clone(), "jdoe").await;
    let cookie = login_user(app.clone(), "jdoe").await;

    sqlx::query("UPDATE sessions SET expires_at = now() - interval '1 hour'")
        .execute(&pool)
        .await
        .expect("expiry update should succeed");

    let response = get_with_cookie(app, "/", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let removal = set_cookie(&response).expect("dead cookie should be cleared");
    assert!(removal.starts_with("quill_session_token_v1=deleted"));

    let json = body_json(response).await;
    assert_eq!(json["logged_in"], false);
}

/// A session whose user row has vanished reports "user does not exist"
/// rather than masquerading as a missing session.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_dangling_session_reports_missing_user(pool: PgPool) {
    let app = build_test_app(pool.clone());
    signup_verified_user(&pool, app.clone(), "jdoe").await;
    let cookie = login_user(app, "jdoe").await;
    let token = cookie
        .split_once('=')
        .expect("cookie pair should be name=value")
        .1
        .to_string();

    // Orphan the session: detach the cascade and remove the user.
    sqlx::query("ALTER TABLE sessions DROP CONSTRAINT sessions_user_id_fkey")
        .execute(&pool)
        .await
        .expect("constraint drop should succeed");
    sqlx::query("DELETE FROM users")
        .execute(&pool)
        .await
        .expect("user delete should succeed");

    let err = auth_service(pool)
        .load_session(&Token::from(token))
        .await
        .expect_err("dangling session must not resolve");
    assert!(matches!(err, AuthError::UserDoesNotExist), "got {err:?}");
}

/// At the HTTP layer a dangling session behaves like any dead cookie:
/// anonymous, with the cookie cleared.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_dangling_session_is_cleared(pool: PgPool) {
    let app = build_test_app(pool.clone());
    signup_verified_user(&pool, app.clone(), "jdoe").await;
    let cookie = login_user(app.clone(), "jdoe").await;

    sqlx::query("ALTER TABLE sessions DROP CONSTRAINT sessions_user_id_fkey")
        .execute(&pool)
        .await
        .expect("constraint drop should succeed");
    sqlx::query("DELETE FROM users")
        .execute(&pool)
        .await
        .expect("user delete should succeed");

    let response = get_with_cookie(app, "/", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let removal = set_cookie(&response).expect("dead cookie should be cleared");
    assert!(removal.starts_with("quill_session_token_v1=deleted"));
    assert_eq!(body_json(response).await["logged_in"], false);
}

/// A stored hash that cannot be parsed is an infrastructure failure, not a
/// wrong password.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_corrupt_stored_hash_is_internal(pool: PgPool) {
    sqlx::query(
        "INSERT INTO users (net_id, name, password_hash, verified_at)
         VALUES ('jdoe', 'Jane Doe', 'not-a-phc-string', now())",
    )
    .execute(&pool)
    .await
    .expect("user insert should succeed");

    let err = auth_service(pool.clone())
        .login("jdoe", PASSWORD)
        .await
        .expect_err("corrupt hash must not authenticate");
    assert!(matches!(err, AuthError::CorruptHash(_)), "got {err:?}");

    let app = build_test_app(pool);
    let body = serde_json::json!({ "net_id": "jdoe", "password": PASSWORD });
    let response = post_json(app, "/login", body).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["code"], "internal");
}

/// A cookie naming no stored session is treated as anonymous.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_session_is_anonymous(pool: PgPool) {
    let app = build_test_app(pool);

    let cookie = format!("quill_session_token_v1={}", "ab".repeat(32));
    let response = get_with_cookie(app, "/", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["logged_in"], false);
}

/// Logout clears the cookie and returns 204.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_clears_cookie(pool: PgPool) {
    let app = build_test_app(pool.clone());
    signup_verified_user(&pool, app.clone(), "jdoe").await;
    let cookie = login_user(app.clone(), "jdoe").await;

    let response =
        post_json_with_cookie(app, "/logout", serde_json::json!({}), &cookie).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let removal = set_cookie(&response).expect("logout must clear the cookie");
    assert!(removal.starts_with("quill_session_token_v1=deleted"));
}

// ---------------------------------------------------------------------------
// Login gates
// ---------------------------------------------------------------------------

/// Anonymous requests to protected routes redirect to the login form.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_protected_route_redirects_anonymous(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(app, "/site").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/login");
}

/// Logged-in users are bounced off the login form to the dashboard.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_form_bounces_logged_in(pool: PgPool) {
    let app = build_test_app(pool.clone());
    signup_verified_user(&pool, app.clone(), "jdoe").await;
    let cookie = login_user(app.clone(), "jdoe").await;

    let response = get_with_cookie(app, "/login", &cookie).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/site");
}
