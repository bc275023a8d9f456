//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Methods accept any [`sqlx::PgExecutor`] so the same query runs against
//! the pool directly or inside an open transaction. Lookups are
//! filter-based ([`crate::clause::Filter`]) and distinguish not-found and
//! uniqueness conflicts from infrastructure failures via
//! [`crate::DbError`].

pub mod email_token_repo;
pub mod session_repo;
pub mod site_repo;
pub mod user_repo;

pub use email_token_repo::EmailTokenRepo;
pub use session_repo::SessionRepo;
pub use site_repo::SiteRepo;
pub use user_repo::UserRepo;
