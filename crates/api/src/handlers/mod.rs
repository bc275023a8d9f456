//! HTTP handlers, grouped by surface.

pub mod auth;
pub mod blogs;
pub mod pages;
