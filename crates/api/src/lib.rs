//! Quill API server library.
//!
//! Exposes the building blocks (config, state, error handling, services,
//! middleware, routes) so integration tests and the binary entrypoint can
//! both access them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod mailer;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod services;
pub mod session;
pub mod shutdown;
pub mod state;
