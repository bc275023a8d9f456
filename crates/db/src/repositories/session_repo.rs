//! Repository for the `sessions` table.

use sqlx::PgExecutor;

use crate::clause::{bind_args_as, build_where, Filter};
use crate::error::DbError;
use crate::models::session::{CreateSession, SessionRow};

const COLUMNS: &str = "id, user_id, token, expires_at, created_at";

/// Provides CRUD operations for server-side sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Persist a freshly minted session, returning the created row.
    pub async fn insert<'e>(
        ex: impl PgExecutor<'e>,
        input: &CreateSession,
    ) -> Result<SessionRow, DbError> {
        let query = format!(
            "INSERT INTO sessions (user_id, token, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SessionRow>(&query)
            .bind(input.user_id)
            .bind(&input.token)
            .bind(input.expires_at)
            .fetch_one(ex)
            .await
            .map_err(DbError::classify)
    }

    /// Fetch a single session matching all filters. Expiry is NOT checked
    /// here; the caller owns that time-dependent decision.
    pub async fn find<'e>(
        ex: impl PgExecutor<'e>,
        filters: &[Filter],
    ) -> Result<SessionRow, DbError> {
        if filters.is_empty() {
            return Err(DbError::MissingFilters);
        }

        let (where_sql, args) = build_where(filters, 1);
        let query = format!("SELECT {COLUMNS} FROM sessions{where_sql}");
        bind_args_as(sqlx::query_as::<_, SessionRow>(&query), args)
            .fetch_one(ex)
            .await
            .map_err(DbError::classify)
    }
}
