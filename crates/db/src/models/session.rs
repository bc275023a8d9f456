//! Server-side session row.

use chrono::Utc;
use quill_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A session row from the `sessions` table.
///
/// The row existing AND `expires_at` being in the future is what makes the
/// matching cookie valid. Expired rows are not pruned here; they are simply
/// invalid on lookup (cleanup is an operational concern).
#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub id: DbId,
    pub user_id: DbId,
    pub token: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

impl SessionRow {
    /// The validity predicate: whether the expiry has passed. Must be
    /// re-evaluated on every lookup since validity is time-dependent.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// DTO for persisting a freshly minted session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub user_id: DbId,
    pub token: String,
    pub expires_at: Timestamp,
}
