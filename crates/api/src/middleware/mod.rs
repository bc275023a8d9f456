//! Request-scoped identity and access gates.
//!
//! Two loader layers ([`session::load_user`], [`session::load_blog`])
//! attach typed extensions to the request; three gate layers
//! ([`gates::require_login`], [`gates::require_blog`],
//! [`gates::require_blog_verified`]) redirect requests whose extensions do
//! not match the route's requirements. Loaders tolerate absence; gates
//! enforce it.

pub mod context;
pub mod gates;
pub mod session;
