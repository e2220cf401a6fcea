// src/repositories/mapping.rs
//
// Column decoding shared by the SQLite repositories.
// All helpers return rusqlite::Error for query_map compatibility.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::Row;
use uuid::Uuid;

use crate::domain::DomainError;

fn conversion_failure<E>(row: &Row, column: &str, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    let index = row.as_ref().column_index(column).unwrap_or(0);
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(err))
}

pub(crate) fn uuid_column(row: &Row, column: &str) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(column)?;
    Uuid::parse_str(&raw).map_err(|e| conversion_failure(row, column, e))
}

pub(crate) fn timestamp_column(row: &Row, column: &str) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_failure(row, column, e))
}

/// Decode a stored label through the domain's parser
pub(crate) fn label_column<T>(
    row: &Row,
    column: &str,
    parse: fn(&str) -> Option<T>,
) -> rusqlite::Result<T> {
    let raw: String = row.get(column)?;
    parse(&raw).ok_or_else(|| {
        conversion_failure(
            row,
            column,
            DomainError::InvariantViolation(format!("Unknown {} value '{}'", column, raw)),
        )
    })
}
