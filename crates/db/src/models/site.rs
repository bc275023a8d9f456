//! Site (personal blog) entity model.

use quill_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A site row from the `sites` table. One per user, keyed by a globally
/// unique subdomain.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Site {
    pub id: DbId,
    pub user_id: DbId,
    pub subdomain: String,
    pub home_content: String,
    pub navbar: String,
    pub custom_stylesheet: String,
    pub verified_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Site {
    pub fn is_verified(&self) -> bool {
        self.verified_at.is_some()
    }
}

/// DTO for creating a site.
#[derive(Debug, Clone)]
pub struct CreateSite {
    pub user_id: DbId,
    pub subdomain: String,
    pub home_content: String,
    pub navbar: String,
    pub custom_stylesheet: String,
}
