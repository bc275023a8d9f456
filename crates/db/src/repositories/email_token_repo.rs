//! Repository for the `email_tokens` table.

use sqlx::PgExecutor;

use crate::clause::{bind_args_as, build_where, Filter};
use crate::error::DbError;
use crate::models::email_token::{CreateEmailToken, EmailToken};

const COLUMNS: &str = "id, user_id, token, expires_at, created_at";

/// Provides CRUD operations for email-verification tokens.
pub struct EmailTokenRepo;

impl EmailTokenRepo {
    /// Issue a verification token, returning the created row.
    pub async fn insert<'e>(
        ex: impl PgExecutor<'e>,
        input: &CreateEmailToken,
    ) -> Result<EmailToken, DbError> {
        let query = format!(
            "INSERT INTO email_tokens (user_id, token, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EmailToken>(&query)
            .bind(input.user_id)
            .bind(&input.token)
            .bind(input.expires_at)
            .fetch_one(ex)
            .await
            .map_err(DbError::classify)
    }

    /// Fetch a single token row matching all filters.
    pub async fn find<'e>(
        ex: impl PgExecutor<'e>,
        filters: &[Filter],
    ) -> Result<EmailToken, DbError> {
        if filters.is_empty() {
            return Err(DbError::MissingFilters);
        }

        let (where_sql, args) = build_where(filters, 1);
        let query = format!("SELECT {COLUMNS} FROM email_tokens{where_sql}");
        bind_args_as(sqlx::query_as::<_, EmailToken>(&query), args)
            .fetch_one(ex)
            .await
            .map_err(DbError::classify)
    }

    /// List token rows matching the filters (a user accumulates one row per
    /// issued verification email).
    pub async fn list<'e>(
        ex: impl PgExecutor<'e>,
        filters: &[Filter],
    ) -> Result<Vec<EmailToken>, DbError> {
        let (where_sql, args) = build_where(filters, 1);
        let query = format!("SELECT {COLUMNS} FROM email_tokens{where_sql}");
        bind_args_as(sqlx::query_as::<_, EmailToken>(&query), args)
            .fetch_all(ex)
            .await
            .map_err(DbError::classify)
    }
}
