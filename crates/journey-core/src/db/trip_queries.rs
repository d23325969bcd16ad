//! Trip document storage with compare-and-swap writes.

use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use super::{json_column, timestamp_to_sql};
use crate::{
    error::{DatabaseResultExt, JourneyError, Resource, Result},
    models::Trip,
};

const INSERT_TRIP_SQL: &str =
    "INSERT INTO trips (id, creator_id, created_at, revision, document) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_TRIP_SQL: &str = "SELECT document, revision FROM trips WHERE id = ?1";
const CHECK_TRIP_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM trips WHERE id = ?1)";
const SAVE_TRIP_SQL: &str =
    "UPDATE trips SET document = ?1, revision = revision + 1 WHERE id = ?2 AND revision = ?3";
const DELETE_TRIP_SQL: &str = "DELETE FROM trips WHERE id = ?1";
const LIST_TRIPS_SQL: &str = "SELECT document, revision FROM trips WHERE creator_id = ?1 \
     ORDER BY created_at DESC, id LIMIT ?2 OFFSET ?3";

impl super::Database {
    /// Stores a newly created trip. Its revision is reset to zero.
    pub fn insert_trip(&self, trip: &mut Trip) -> Result<()> {
        trip.revision = 0;
        let document = serde_json::to_string(&trip)?;

        self.connection
            .execute(
                INSERT_TRIP_SQL,
                params![
                    trip.id.to_string(),
                    trip.creator_id.to_string(),
                    timestamp_to_sql(trip.created_at),
                    0_i64,
                    document,
                ],
            )
            .db_context("Failed to insert trip")?;

        Ok(())
    }

    /// Loads a trip by id, with the revision it was stored at.
    pub fn get_trip(&self, id: Uuid) -> Result<Option<Trip>> {
        self.connection
            .query_row(SELECT_TRIP_SQL, params![id.to_string()], read_trip)
            .optional()
            .db_context("Failed to query trip")
    }

    /// Writes a modified trip back, provided nobody else wrote it since it
    /// was loaded. On success `trip.revision` is advanced.
    ///
    /// # Errors
    ///
    /// Returns `JourneyError::RevisionConflict` if the stored revision moved on
    /// Returns `JourneyError::NotFound` if the trip was deleted meanwhile
    pub fn save_trip(&self, trip: &mut Trip) -> Result<()> {
        let expected = trip.revision;
        trip.revision = expected + 1;
        let document = serde_json::to_string(&trip);
        trip.revision = expected;
        let document = document?;

        let revision = i64::try_from(expected).map_err(|_| JourneyError::RevisionConflict {
            id: trip.id.to_string(),
        })?;

        let updated = self
            .connection
            .execute(SAVE_TRIP_SQL, params![document, trip.id.to_string(), revision])
            .db_context("Failed to save trip")?;

        if updated == 0 {
            let exists: bool = self
                .connection
                .query_row(CHECK_TRIP_EXISTS_SQL, params![trip.id.to_string()], |row| {
                    row.get(0)
                })
                .db_context("Failed to check trip existence")?;

            return Err(if exists {
                JourneyError::RevisionConflict {
                    id: trip.id.to_string(),
                }
            } else {
                JourneyError::not_found(Resource::Trip, trip.id)
            });
        }

        trip.revision = expected + 1;
        Ok(())
    }

    /// Deletes a trip document. Returns whether a trip was removed.
    pub fn delete_trip(&self, id: Uuid) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_TRIP_SQL, params![id.to_string()])
            .db_context("Failed to delete trip")?;
        Ok(deleted > 0)
    }

    /// Lists a user's trips, newest first.
    pub fn list_trips(&self, creator_id: Uuid, limit: u32, offset: u32) -> Result<Vec<Trip>> {
        let mut stmt = self
            .connection
            .prepare(LIST_TRIPS_SQL)
            .db_context("Failed to prepare query")?;

        let trips = stmt
            .query_map(
                params![creator_id.to_string(), i64::from(limit), i64::from(offset)],
                read_trip,
            )
            .db_context("Failed to query trips")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read trips")?;

        Ok(trips)
    }
}

fn read_trip(row: &rusqlite::Row<'_>) -> rusqlite::Result<Trip> {
    let mut trip: Trip = json_column(row, 0)?;
    let revision: i64 = row.get(1)?;
    trip.revision = u64::try_from(revision).unwrap_or_default();
    Ok(trip)
}
