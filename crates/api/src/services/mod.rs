//! Domain services: the pipeline between HTTP handlers and repositories.

pub mod blogs;
pub mod users;
