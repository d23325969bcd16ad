//! Journal entry queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use super::{json_column, timestamp_column, timestamp_to_sql, uuid_column};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{JournalEntry, JournalEntryKind, Location},
};

const INSERT_ENTRY_SQL: &str = "INSERT INTO journal_entries (id, creator_id, date, kind, message, contents, location) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const SELECT_ENTRY_SQL: &str = "SELECT id, creator_id, date, kind, message, contents, location \
     FROM journal_entries WHERE id = ?1 AND creator_id = ?2";
const DELETE_ENTRY_SQL: &str = "DELETE FROM journal_entries WHERE id = ?1 AND creator_id = ?2";
const LIST_ENTRIES_SQL: &str = "SELECT id, creator_id, date, kind, message, contents, location \
     FROM journal_entries WHERE creator_id = ?1 AND date < ?2 \
     ORDER BY date DESC, id LIMIT ?3 OFFSET ?4";

impl super::Database {
    pub fn insert_journal_entry(&self, entry: &JournalEntry) -> Result<()> {
        let contents = serde_json::to_string(&entry.contents)?;
        let location = entry
            .location
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        self.connection
            .execute(
                INSERT_ENTRY_SQL,
                params![
                    entry.id.to_string(),
                    entry.creator_id.to_string(),
                    timestamp_to_sql(entry.date),
                    entry.kind.as_str(),
                    entry.message,
                    contents,
                    location,
                ],
            )
            .db_context("Failed to insert journal entry")?;

        Ok(())
    }

    /// Loads an entry, but only if `creator_id` wrote it.
    pub fn get_journal_entry(&self, id: Uuid, creator_id: Uuid) -> Result<Option<JournalEntry>> {
        self.connection
            .query_row(
                SELECT_ENTRY_SQL,
                params![id.to_string(), creator_id.to_string()],
                read_entry,
            )
            .optional()
            .db_context("Failed to query journal entry")
    }

    pub fn delete_journal_entry(&self, id: Uuid, creator_id: Uuid) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_ENTRY_SQL, params![id.to_string(), creator_id.to_string()])
            .db_context("Failed to delete journal entry")?;
        Ok(deleted > 0)
    }

    /// Lists a user's entries strictly older than `max_date` (if given),
    /// newest first.
    pub fn list_journal_entries(
        &self,
        creator_id: Uuid,
        max_date: Option<Timestamp>,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<JournalEntry>> {
        let upper = max_date.map_or(i64::MAX, timestamp_to_sql);

        let mut stmt = self
            .connection
            .prepare(LIST_ENTRIES_SQL)
            .db_context("Failed to prepare query")?;

        let entries = stmt
            .query_map(
                params![
                    creator_id.to_string(),
                    upper,
                    i64::from(limit),
                    i64::from(offset)
                ],
                read_entry,
            )
            .db_context("Failed to query journal entries")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read journal entries")?;

        Ok(entries)
    }
}

fn read_entry(row: &Row<'_>) -> rusqlite::Result<JournalEntry> {
    let kind_str: String = row.get(3)?;
    let kind = kind_str.parse::<JournalEntryKind>().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Invalid journal entry type: {kind_str}"),
            )),
        )
    })?;

    let location: Option<String> = row.get(6)?;
    let location = location
        .map(|text| serde_json::from_str::<Location>(&text))
        .transpose()
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(JournalEntry {
        id: uuid_column(row, 0)?,
        creator_id: uuid_column(row, 1)?,
        date: timestamp_column(row, 2)?,
        kind,
        message: row.get(4)?,
        contents: json_column(row, 5)?,
        location,
    })
}
