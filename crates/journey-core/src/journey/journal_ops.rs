//! Journal entry operations for Journey.

use uuid::Uuid;

use super::{trip_ops::ensure_self, Journey};
use crate::{
    access::Caller,
    db::current_timestamp,
    error::{JourneyError, Resource, Result},
    models::JournalEntry,
    params::{ListJournalEntries, NewJournalEntry, DEFAULT_ENTRY_COUNT},
};

/// Text entries carry a message and no media; media entries carry media.
fn validate_entry(params: &NewJournalEntry) -> Result<()> {
    if params.kind.has_media() {
        if params.contents.iter().all(|url| url.trim().is_empty()) {
            return Err(JourneyError::invalid_input("contents")
                .with_reason(format!("A {} entry needs contents", params.kind.as_str())));
        }
    } else {
        if !params.contents.is_empty() {
            return Err(JourneyError::invalid_input("contents")
                .with_reason("Text entry has invalid contents"));
        }
        if params.message.as_deref().map_or(true, |m| m.trim().is_empty()) {
            return Err(JourneyError::invalid_input("message")
                .with_reason("A text entry needs a message"));
        }
    }
    Ok(())
}

impl Journey {
    /// Records a journal entry for the caller.
    pub async fn create_journal_entry(
        &self,
        caller: Caller,
        params: NewJournalEntry,
    ) -> Result<JournalEntry> {
        let creator_id = caller.user_id().ok_or(JourneyError::NotAuthorized)?;
        validate_entry(&params)?;

        let entry = JournalEntry {
            id: Uuid::new_v4(),
            creator_id,
            date: current_timestamp(),
            kind: params.kind,
            message: params.message,
            contents: params.contents,
            location: params.location,
        };

        self.with_database(move |db| {
            db.insert_journal_entry(&entry)?;
            Ok(entry)
        })
        .await
    }

    /// Fetches one of the caller's own entries. Entries of other users are
    /// reported as missing.
    pub async fn get_journal_entry(&self, caller: Caller, entry_id: Uuid) -> Result<JournalEntry> {
        let creator_id = caller.user_id().ok_or(JourneyError::NotAuthorized)?;

        self.with_database(move |db| {
            db.get_journal_entry(entry_id, creator_id)?
                .ok_or_else(|| JourneyError::not_found(Resource::JournalEntry, entry_id))
        })
        .await
    }

    pub async fn delete_journal_entry(&self, caller: Caller, entry_id: Uuid) -> Result<()> {
        let creator_id = caller.user_id().ok_or(JourneyError::NotAuthorized)?;

        self.with_database(move |db| {
            if db.delete_journal_entry(entry_id, creator_id)? {
                Ok(())
            } else {
                Err(JourneyError::not_found(Resource::JournalEntry, entry_id))
            }
        })
        .await
    }

    /// Lists a user's entries, newest first. An empty page is a not-found
    /// error.
    pub async fn list_journal_entries(
        &self,
        caller: Caller,
        user_id: Uuid,
        query: ListJournalEntries,
    ) -> Result<Vec<JournalEntry>> {
        ensure_self(caller, user_id)?;
        let (limit, offset) = query.page().limit_offset(DEFAULT_ENTRY_COUNT);

        let entries = self
            .with_database(move |db| db.list_journal_entries(user_id, query.max_date, limit, offset))
            .await?;

        if entries.is_empty() {
            return Err(JourneyError::NotFound {
                resource: Resource::JournalEntry,
                id: user_id.to_string(),
            });
        }
        Ok(entries)
    }
}
