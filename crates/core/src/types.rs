//! Shared scalar type aliases.

/// Database row identifier (`bigserial` in Postgres).
pub type DbId = i64;

/// UTC timestamp used for all persisted times.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
