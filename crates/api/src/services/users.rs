//! Account lifecycle: signup, email verification, login, session resolution.

use std::sync::Arc;

use chrono::{Duration, Utc};
use quill_core::password::{hash_password, verify_password};
use quill_core::session::{Session, SESSION_TTL_HOURS};
use quill_core::token::Token;
use quill_core::validate::{validate_login, validate_signup};
use quill_db::clause::{Filter, Update};
use quill_db::error::DbError;
use quill_db::models::email_token::CreateEmailToken;
use quill_db::models::session::CreateSession;
use quill_db::models::user::{CreateUser, User};
use quill_db::repositories::email_token_repo::EmailTokenRepo;
use quill_db::repositories::session_repo::SessionRepo;
use quill_db::repositories::user_repo::UserRepo;
use quill_db::DbPool;

use crate::config::ServerConfig;
use crate::mailer::{MailError, Mailer};

/// Verification tokens expire on the same clock as sessions.
pub const EMAIL_TOKEN_TTL_HOURS: i64 = SESSION_TTL_HOURS;

/// Everything that can go wrong in the account pipeline.
///
/// The HTTP layer decides which variants are distinguishable to clients;
/// here they stay distinct so logs and tests can tell them apart.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("a user with that net id already exists")]
    UserExists,

    #[error("no user with that net id")]
    UserDoesNotExist,

    #[error("user has not verified their email")]
    UserNotVerified,

    #[error("password does not match")]
    WrongPassword,

    /// The stored hash could not be parsed. Data corruption, not a
    /// credentials failure; surfaces at the 500 boundary.
    #[error("stored password hash unreadable: {0}")]
    CorruptHash(String),

    #[error("verification token not found")]
    TokenNotFound,

    #[error("verification token expired")]
    TokenExpired,

    #[error("session not found")]
    SessionDoesNotExist,

    #[error("session expired")]
    SessionExpired,

    #[error(transparent)]
    Db(DbError),

    #[error(transparent)]
    Mail(#[from] MailError),
}

/// A successful signup, returned to the handler for the response body.
#[derive(Debug)]
pub struct SignupOutcome {
    pub user: User,
    pub email: String,
}

/// Orchestrates users, sessions, and verification tokens.
pub struct AuthService {
    pool: DbPool,
    mailer: Arc<dyn Mailer>,
    config: Arc<ServerConfig>,
}

impl AuthService {
    pub fn new(pool: DbPool, mailer: Arc<dyn Mailer>, config: Arc<ServerConfig>) -> Self {
        Self {
            pool,
            mailer,
            config,
        }
    }

    /// The institutional email address for a net id.
    pub fn email_for(&self, net_id: &str) -> String {
        format!("{net_id}@{}", self.config.email_domain)
    }

    /// Register a new account and send its verification email.
    ///
    /// The user row and token row are inserted without a surrounding
    /// transaction: if token insertion or delivery fails after the user
    /// exists, the account is recoverable by support rather than rolled
    /// back, and the signup reports the failure.
    pub async fn signup(
        &self,
        net_id: &str,
        name: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<SignupOutcome, AuthError> {
        validate_signup(net_id, name, password, password_confirm).map_err(AuthError::Validation)?;

        let user = UserRepo::insert(
            &self.pool,
            &CreateUser {
                net_id: net_id.to_string(),
                name: name.to_string(),
                password_hash: hash_password(password),
            },
        )
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                AuthError::UserExists
            } else {
                AuthError::Db(e)
            }
        })?;

        let token = Token::generate();
        EmailTokenRepo::insert(
            &self.pool,
            &CreateEmailToken {
                user_id: user.id,
                token: token.as_str().to_string(),
                expires_at: Utc::now() + Duration::hours(EMAIL_TOKEN_TTL_HOURS),
            },
        )
        .await
        .map_err(AuthError::Db)?;

        let email = self.email_for(net_id);
        self.mailer
            .send_verification_email(&email, name, &token)
            .await?;

        tracing::info!(net_id, "user signed up, verification email issued");
        Ok(SignupOutcome { user, email })
    }

    /// Mark the account owning `token` as verified.
    ///
    /// Re-presenting an already-consumed but unexpired token re-verifies
    /// harmlessly; tokens are read, never deleted.
    pub async fn verify(&self, token: &Token) -> Result<(), AuthError> {
        let row = EmailTokenRepo::find(&self.pool, &[Filter::eq("token", token)])
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    AuthError::TokenNotFound
                } else {
                    AuthError::Db(e)
                }
            })?;

        if row.is_expired() {
            return Err(AuthError::TokenExpired);
        }

        let now = Utc::now();
        UserRepo::update(
            &self.pool,
            &[
                Update::set("verified_at", now),
                Update::set("updated_at", now),
            ],
            &[Filter::eq("id", row.user_id)],
        )
        .await
        .map_err(AuthError::Db)?;

        tracing::info!(user_id = row.user_id, "user verified");
        Ok(())
    }

    /// Authenticate credentials and mint a fresh session.
    ///
    /// The verified check runs before the password check, so an unverified
    /// account learns it must verify even with correct credentials.
    pub async fn login(&self, net_id: &str, password: &str) -> Result<(User, Session), AuthError> {
        validate_login(net_id, password).map_err(AuthError::Validation)?;

        let user = UserRepo::find(&self.pool, &[Filter::eq("net_id", net_id)])
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    AuthError::UserDoesNotExist
                } else {
                    AuthError::Db(e)
                }
            })?;

        if !user.is_verified() {
            return Err(AuthError::UserNotVerified);
        }

        match verify_password(password, &user.password_hash) {
            Ok(true) => {}
            Ok(false) => return Err(AuthError::WrongPassword),
            Err(e) => return Err(AuthError::CorruptHash(e.to_string())),
        }

        let session = Session::new();
        SessionRepo::insert(
            &self.pool,
            &CreateSession {
                user_id: user.id,
                token: session.token.as_str().to_string(),
                expires_at: session.expires_at,
            },
        )
        .await
        .map_err(AuthError::Db)?;

        tracing::info!(net_id, "user logged in");
        Ok((user, session))
    }

    /// Resolve a cookie token to its user.
    ///
    /// Called on every request carrying a session cookie; expiry is checked
    /// here, per request, because validity is time-dependent.
    pub async fn load_session(&self, token: &Token) -> Result<User, AuthError> {
        let row = SessionRepo::find(&self.pool, &[Filter::eq("token", token)])
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    AuthError::SessionDoesNotExist
                } else {
                    AuthError::Db(e)
                }
            })?;

        if row.is_expired() {
            return Err(AuthError::SessionExpired);
        }

        UserRepo::find(&self.pool, &[Filter::eq("id", row.user_id)])
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    // A session pointing at no user is a referential
                    // anomaly; report it rather than panic.
                    AuthError::UserDoesNotExist
                } else {
                    AuthError::Db(e)
                }
            })
    }
}
