//! User entity model.

use quill_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- never serialize this to API responses.
/// `verified_at` is NULL until the email-verification token is presented;
/// that one-way transition is the only mutation this core performs.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub net_id: String,
    pub name: String,
    pub password_hash: String,
    pub verified_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn is_verified(&self) -> bool {
        self.verified_at.is_some()
    }
}

/// DTO for inserting a new user. The password arrives pre-hashed; plaintext
/// never crosses this boundary.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub net_id: String,
    pub name: String,
    pub password_hash: String,
}
