//! Email-verification token row.

use chrono::Utc;
use quill_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A verification token from the `email_tokens` table.
///
/// Consumed by reading, never mutated or deleted; replaying a consumed but
/// unexpired token re-verifies harmlessly.
#[derive(Debug, Clone, FromRow)]
pub struct EmailToken {
    pub id: DbId,
    pub user_id: DbId,
    pub token: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

impl EmailToken {
    /// Whether the expiry has passed. Checked at consumption regardless of
    /// whether the owner verified earlier.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// DTO for issuing a verification token alongside a new user.
#[derive(Debug, Clone)]
pub struct CreateEmailToken {
    pub user_id: DbId,
    pub token: String,
    pub expires_at: Timestamp,
}
