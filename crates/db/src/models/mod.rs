//! Row types and insert DTOs, one module per table.

pub mod email_token;
pub mod session;
pub mod site;
pub mod user;
