//! Repository for the `users` table.

use sqlx::PgExecutor;

use crate::clause::{bind_args, bind_args_as, build_set, build_where, Filter, Update};
use crate::error::DbError;
use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, net_id, name, password_hash, verified_at, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row. A duplicate net id
    /// surfaces as [`DbError::UniqueViolation`].
    pub async fn insert<'e>(
        ex: impl PgExecutor<'e>,
        input: &CreateUser,
    ) -> Result<User, DbError> {
        let query = format!(
            "INSERT INTO users (net_id, name, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.net_id)
            .bind(&input.name)
            .bind(&input.password_hash)
            .fetch_one(ex)
            .await
            .map_err(DbError::classify)
    }

    /// Fetch a single user matching all filters.
    ///
    /// Calling this without filters is a caller bug and fails with
    /// [`DbError::MissingFilters`] instead of returning an arbitrary row.
    pub async fn find<'e>(ex: impl PgExecutor<'e>, filters: &[Filter]) -> Result<User, DbError> {
        if filters.is_empty() {
            return Err(DbError::MissingFilters);
        }

        let (where_sql, args) = build_where(filters, 1);
        let query = format!("SELECT {COLUMNS} FROM users{where_sql}");
        bind_args_as(sqlx::query_as::<_, User>(&query), args)
            .fetch_one(ex)
            .await
            .map_err(DbError::classify)
    }

    /// Apply updates to all users matching the filters.
    pub async fn update<'e>(
        ex: impl PgExecutor<'e>,
        updates: &[Update],
        filters: &[Filter],
    ) -> Result<(), DbError> {
        if filters.is_empty() {
            tracing::debug!("updating users without filters");
        }

        let (set_sql, mut args) = build_set(updates, 1);
        let (where_sql, where_args) = build_where(filters, args.len() + 1);
        args.extend(where_args);

        let query = format!("UPDATE users{set_sql}{where_sql}");
        bind_args(sqlx::query(&query), args)
            .execute(ex)
            .await
            .map(|_| ())
            .map_err(DbError::classify)
    }
}
