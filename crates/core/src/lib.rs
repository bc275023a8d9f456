//! Domain primitives for the quill platform.
//!
//! This crate is dependency-light: ids, timestamps, token and credential
//! primitives, the session value, and input validation. Anything that
//! touches the database or HTTP lives in `quill-db` / `quill-api`.

pub mod password;
pub mod session;
pub mod token;
pub mod types;
pub mod validate;
