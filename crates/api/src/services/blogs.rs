//! Blog provisioning and lookup.

use quill_core::types::DbId;
use quill_core::validate::{validate_blog_name, validate_blog_year};
use quill_db::clause::Filter;
use quill_db::error::DbError;
use quill_db::models::site::{CreateSite, Site};
use quill_db::repositories::site_repo::SiteRepo;
use quill_db::DbPool;

/// Navbar every new blog starts with.
pub const DEFAULT_NAVBAR: &str = "[Home](/)";

/// Home page every new blog starts with.
pub const DEFAULT_HOME_CONTENT: &str = "# Hello World \n Hola Mundo.";

#[derive(Debug, thiserror::Error)]
pub enum BlogError {
    #[error("{0}")]
    Validation(String),

    #[error("subdomain not available")]
    SubdomainNotAvailable,

    #[error("no blog for this user")]
    BlogDoesNotExist,

    #[error(transparent)]
    Db(DbError),
}

/// Orchestrates site rows.
pub struct BlogService {
    pool: DbPool,
}

impl BlogService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Provision a blog for `user_id` at the subdomain `{name}.{year}`.
    ///
    /// Both the subdomain-taken and the one-blog-per-user conflicts surface
    /// as [`BlogError::SubdomainNotAvailable`]; uniqueness is enforced by
    /// the database, so concurrent creations cannot both succeed.
    pub async fn create(&self, user_id: DbId, name: &str, year: i32) -> Result<Site, BlogError> {
        validate_blog_name(name).map_err(BlogError::Validation)?;
        validate_blog_year(year).map_err(BlogError::Validation)?;

        let subdomain = format!("{name}.{year}");
        let site = SiteRepo::insert(
            &self.pool,
            &CreateSite {
                user_id,
                subdomain: subdomain.clone(),
                home_content: DEFAULT_HOME_CONTENT.to_string(),
                navbar: DEFAULT_NAVBAR.to_string(),
                custom_stylesheet: String::new(),
            },
        )
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                BlogError::SubdomainNotAvailable
            } else {
                BlogError::Db(e)
            }
        })?;

        tracing::info!(user_id, subdomain, "blog created");
        Ok(site)
    }

    /// The blog owned by `user_id`, if any.
    pub async fn load_blog_from_user(&self, user_id: DbId) -> Result<Site, BlogError> {
        SiteRepo::find(&self.pool, &[Filter::eq("user_id", user_id)])
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    BlogError::BlogDoesNotExist
                } else {
                    BlogError::Db(e)
                }
            })
    }
}
