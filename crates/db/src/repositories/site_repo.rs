//! Repository for the `sites` table.

use sqlx::PgExecutor;

use crate::clause::{bind_args_as, build_where, Filter};
use crate::error::DbError;
use crate::models::site::{CreateSite, Site};

const COLUMNS: &str = "id, user_id, subdomain, home_content, navbar, custom_stylesheet, \
                       verified_at, created_at, updated_at";

/// Provides CRUD operations for sites.
pub struct SiteRepo;

impl SiteRepo {
    /// Insert a new site, returning the created row. Both the subdomain and
    /// the one-blog-per-user constraints surface as
    /// [`DbError::UniqueViolation`].
    pub async fn insert<'e>(ex: impl PgExecutor<'e>, input: &CreateSite) -> Result<Site, DbError> {
        let query = format!(
            "INSERT INTO sites (user_id, subdomain, home_content, navbar, custom_stylesheet)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Site>(&query)
            .bind(input.user_id)
            .bind(&input.subdomain)
            .bind(&input.home_content)
            .bind(&input.navbar)
            .bind(&input.custom_stylesheet)
            .fetch_one(ex)
            .await
            .map_err(DbError::classify)
    }

    /// Fetch a single site matching all filters.
    pub async fn find<'e>(ex: impl PgExecutor<'e>, filters: &[Filter]) -> Result<Site, DbError> {
        if filters.is_empty() {
            return Err(DbError::MissingFilters);
        }

        let (where_sql, args) = build_where(filters, 1);
        let query = format!("SELECT {COLUMNS} FROM sites{where_sql}");
        bind_args_as(sqlx::query_as::<_, Site>(&query), args)
            .fetch_one(ex)
            .await
            .map_err(DbError::classify)
    }

    /// List sites matching the filters.
    pub async fn list<'e>(
        ex: impl PgExecutor<'e>,
        filters: &[Filter],
    ) -> Result<Vec<Site>, DbError> {
        let (where_sql, args) = build_where(filters, 1);
        let query = format!("SELECT {COLUMNS} FROM sites{where_sql}");
        bind_args_as(sqlx::query_as::<_, Site>(&query), args)
            .fetch_all(ex)
            .await
            .map_err(DbError::classify)
    }
}
