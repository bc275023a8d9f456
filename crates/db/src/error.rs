//! Classification of database failures.
//!
//! Callers need three distinguishable outcomes from every query: "no
//! matching row", "uniqueness violation", and "everything else". The first
//! two are expected, recoverable conditions (not-found branching and
//! conflict translation); the rest is infrastructure failure.

/// A classified database error.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The query matched no rows.
    #[error("no rows found for query")]
    NotFound,

    /// A unique constraint was violated. Concurrent inserts land here too;
    /// the conflict is correctness, not transience, so callers never retry.
    #[error("unique violation on {constraint}")]
    UniqueViolation { constraint: String },

    /// A foreign key constraint was violated.
    #[error("foreign key violation on {constraint}")]
    ForeignKeyViolation { constraint: String },

    /// A NOT NULL constraint was violated.
    #[error("not null violation")]
    NotNullViolation,

    /// A lookup or update was issued without any filter. This is a
    /// programming error in the caller, not a data condition.
    #[error("query requires at least one filter")]
    MissingFilters,

    /// Any other sqlx failure (connection, protocol, decode). Constructed
    /// through [`DbError::classify`] only, so constraint violations are
    /// never hidden in here.
    #[error(transparent)]
    Other(sqlx::Error),
}

impl DbError {
    /// Classify a raw sqlx error.
    ///
    /// Postgres error codes: 23505 unique, 23503 foreign key, 23502 not
    /// null. `RowNotFound` maps to [`DbError::NotFound`].
    pub fn classify(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => DbError::NotFound,
            sqlx::Error::Database(db_err) => {
                let constraint = || db_err.constraint().unwrap_or("unknown").to_string();
                match db_err.code().as_deref() {
                    Some("23505") => DbError::UniqueViolation {
                        constraint: constraint(),
                    },
                    Some("23503") => DbError::ForeignKeyViolation {
                        constraint: constraint(),
                    },
                    Some("23502") => DbError::NotNullViolation,
                    _ => DbError::Other(err),
                }
            }
            _ => DbError::Other(err),
        }
    }

    /// Whether this is the "no matching row" outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound)
    }

    /// Whether this is a uniqueness conflict.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, DbError::UniqueViolation { .. })
    }
}
