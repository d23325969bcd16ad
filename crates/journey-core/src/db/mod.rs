//! SQLite persistence for users, trips and journal entries.
//!
//! Trips are stored whole, as a JSON document next to a handful of indexed
//! columns. Every trip write is a compare-and-swap on the `revision` column,
//! so two requests that read the same revision cannot both write it back.
//!
//! Timestamps used for sorting and filtering are stored as integer
//! microseconds since the Unix epoch.

use std::path::Path;

use jiff::Timestamp;
use rusqlite::{types::Type, Connection, Row};
use uuid::Uuid;

use crate::error::{DatabaseResultExt, Result};

pub mod journal_queries;
pub mod migrations;
pub mod trip_queries;
pub mod user_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

/// Current time at the precision the database keeps.
pub(crate) fn current_timestamp() -> Timestamp {
    let now = Timestamp::now();
    Timestamp::from_microsecond(now.as_microsecond()).unwrap_or(now)
}

fn timestamp_to_sql(timestamp: Timestamp) -> i64 {
    timestamp.as_microsecond()
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Timestamp> {
    let micros: i64 = row.get(idx)?;
    Timestamp::from_microsecond(micros)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}

fn uuid_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    row.get::<_, String>(idx)?
        .parse::<Uuid>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn json_column<T: serde::de::DeserializeOwned>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let text: String = row.get(idx)?;
    serde_json::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
