use std::sync::Arc;

use quill_db::DbPool;

use crate::config::ServerConfig;
use crate::mailer::Mailer;
use crate::services::blogs::BlogService;
use crate::services::users::AuthService;

/// Shared application state, cloned into every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub fn new(pool: DbPool, config: ServerConfig, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            mailer,
        }
    }

    /// Authentication service bound to this state's pool and mailer.
    pub fn auth(&self) -> AuthService {
        AuthService::new(self.pool.clone(), self.mailer.clone(), self.config.clone())
    }

    /// Blog service bound to this state's pool.
    pub fn blogs(&self) -> BlogService {
        BlogService::new(self.pool.clone())
    }
}
