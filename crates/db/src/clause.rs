//! Value-level WHERE/SET clause building.
//!
//! Repositories accept [`Filter`] and [`Update`] values instead of raw SQL
//! fragments, render them into `$n`-placeholder clauses, and bind the
//! collected arguments in order. Column names are `&'static str` supplied by
//! the repositories themselves, never by callers outside this crate.

use chrono::{DateTime, Utc};
use quill_core::token::Token;
use sqlx::postgres::PgArguments;
use sqlx::query::{Query, QueryAs};
use sqlx::Postgres;

/// A bindable argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Int(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl From<i64> for Arg {
    fn from(v: i64) -> Self {
        Arg::Int(v)
    }
}

impl From<&str> for Arg {
    fn from(v: &str) -> Self {
        Arg::Text(v.to_string())
    }
}

impl From<String> for Arg {
    fn from(v: String) -> Self {
        Arg::Text(v)
    }
}

impl From<DateTime<Utc>> for Arg {
    fn from(v: DateTime<Utc>) -> Self {
        Arg::Timestamp(v)
    }
}

impl From<&Token> for Arg {
    fn from(v: &Token) -> Self {
        Arg::Text(v.as_str().to_string())
    }
}

/// One comparison in a WHERE clause.
#[derive(Debug, Clone)]
pub struct Filter {
    column: &'static str,
    cmp: &'static str,
    arg: FilterArg,
}

#[derive(Debug, Clone)]
enum FilterArg {
    Value(Arg),
    List(Vec<Arg>),
    Null,
}

impl Filter {
    fn new(column: &'static str, cmp: &'static str, arg: FilterArg) -> Self {
        Filter { column, cmp, arg }
    }

    pub fn eq(column: &'static str, arg: impl Into<Arg>) -> Self {
        Self::new(column, "=", FilterArg::Value(arg.into()))
    }

    pub fn ne(column: &'static str, arg: impl Into<Arg>) -> Self {
        Self::new(column, "<>", FilterArg::Value(arg.into()))
    }

    pub fn gte(column: &'static str, arg: impl Into<Arg>) -> Self {
        Self::new(column, ">=", FilterArg::Value(arg.into()))
    }

    pub fn lte(column: &'static str, arg: impl Into<Arg>) -> Self {
        Self::new(column, "<=", FilterArg::Value(arg.into()))
    }

    pub fn is_null(column: &'static str) -> Self {
        Self::new(column, "IS", FilterArg::Null)
    }

    pub fn is_not_null(column: &'static str) -> Self {
        Self::new(column, "IS NOT", FilterArg::Null)
    }

    /// Set membership. An empty list renders the always-false predicate
    /// `1 = 0` rather than matching every row, which is what a literal
    /// `IN ()` degenerates to in some engines.
    pub fn is_in(column: &'static str, args: Vec<impl Into<Arg>>) -> Self {
        Self::new(
            column,
            "IN",
            FilterArg::List(args.into_iter().map(Into::into).collect()),
        )
    }

    /// Render this filter starting at placeholder `$start`, appending bound
    /// arguments to `args`. Returns the rendered condition.
    fn render(&self, start: usize, args: &mut Vec<Arg>) -> String {
        match &self.arg {
            FilterArg::Value(arg) => {
                args.push(arg.clone());
                format!("{} {} ${}", self.column, self.cmp, start)
            }
            FilterArg::Null => format!("{} {} NULL", self.column, self.cmp),
            FilterArg::List(list) => {
                if list.is_empty() {
                    return "1 = 0".to_string();
                }

                let placeholders: Vec<String> = (0..list.len())
                    .map(|i| format!("${}", start + i))
                    .collect();
                args.extend(list.iter().cloned());
                format!("{} {} ({})", self.column, self.cmp, placeholders.join(", "))
            }
        }
    }
}

/// One assignment in a SET clause.
#[derive(Debug, Clone)]
pub struct Update {
    column: &'static str,
    arg: Arg,
}

impl Update {
    pub fn set(column: &'static str, arg: impl Into<Arg>) -> Self {
        Update {
            column,
            arg: arg.into(),
        }
    }
}

/// Render ` WHERE ...` for the given filters, with placeholders numbered
/// from `start`. Returns an empty clause for an empty filter list.
pub fn build_where(filters: &[Filter], start: usize) -> (String, Vec<Arg>) {
    if filters.is_empty() {
        return (String::new(), Vec::new());
    }

    let mut args = Vec::new();
    let mut conditions = Vec::with_capacity(filters.len());
    for filter in filters {
        conditions.push(filter.render(start + args.len(), &mut args));
    }

    (format!(" WHERE {}", conditions.join(" AND ")), args)
}

/// Render ` SET ...` for the given updates, with placeholders numbered from
/// `start`. Returns an empty clause for an empty update list.
pub fn build_set(updates: &[Update], start: usize) -> (String, Vec<Arg>) {
    if updates.is_empty() {
        return (String::new(), Vec::new());
    }

    let mut args = Vec::with_capacity(updates.len());
    let assignments: Vec<String> = updates
        .iter()
        .enumerate()
        .map(|(i, update)| {
            args.push(update.arg.clone());
            format!("{} = ${}", update.column, start + i)
        })
        .collect();

    (format!(" SET {}", assignments.join(", ")), args)
}

/// Bind collected arguments, in order, onto a row-mapping query.
pub fn bind_args_as<'q, T>(
    mut query: QueryAs<'q, Postgres, T, PgArguments>,
    args: Vec<Arg>,
) -> QueryAs<'q, Postgres, T, PgArguments> {
    for arg in args {
        query = match arg {
            Arg::Int(v) => query.bind(v),
            Arg::Text(v) => query.bind(v),
            Arg::Timestamp(v) => query.bind(v),
        };
    }
    query
}

/// Bind collected arguments, in order, onto an execute-only query.
pub fn bind_args<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    args: Vec<Arg>,
) -> Query<'q, Postgres, PgArguments> {
    for arg in args {
        query = match arg {
            Arg::Int(v) => query.bind(v),
            Arg::Text(v) => query.bind(v),
            Arg::Timestamp(v) => query.bind(v),
        };
    }
    query
}
