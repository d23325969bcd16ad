//! Trip operations for Journey.
//!
//! Reads check [`Operation::Read`] access, everything else checks
//! [`Operation::Write`]. Writes load the trip, apply one aggregate method,
//! validate the result and store it with a compare-and-swap on its revision.
//! A failing step anywhere in that chain means nothing is written.

use uuid::Uuid;

use super::Journey;
use crate::{
    access::{check_access, Caller, Operation},
    db::Database,
    error::{JourneyError, Resource, Result},
    models::{Day, Idea, Trip},
    params::{
        CreateTrip, NewIdea, NewPlanEntry, Page, RemovePlanEntry, UpdateDay, UpdateIdea,
        UpdatePlanEntry, UpdateTrip, DEFAULT_TRIP_COUNT,
    },
};

fn load_trip(db: &Database, trip_id: Uuid) -> Result<Trip> {
    db.get_trip(trip_id)?
        .ok_or_else(|| JourneyError::not_found(Resource::Trip, trip_id))
}

impl Journey {
    /// Loads a trip the caller may read.
    async fn read_trip(&self, caller: Caller, trip_id: Uuid) -> Result<Trip> {
        self.with_database(move |db| {
            let trip = load_trip(db, trip_id)?;
            check_access(caller, &trip, Operation::Read)?;
            Ok(trip)
        })
        .await
    }

    /// Load, check write access, mutate, validate, compare-and-swap.
    async fn modify_trip<T, F>(&self, caller: Caller, trip_id: Uuid, mutate: F) -> Result<(Trip, T)>
    where
        T: Send + 'static,
        F: FnOnce(&mut Trip) -> Result<T> + Send + 'static,
    {
        self.with_database(move |db| {
            let mut trip = load_trip(db, trip_id)?;
            check_access(caller, &trip, Operation::Write)?;

            let output = mutate(&mut trip)?;
            trip.validate()?;

            if let Err(e) = db.save_trip(&mut trip) {
                if matches!(e, JourneyError::RevisionConflict { .. }) {
                    log::warn!("concurrent write to trip {trip_id} rejected");
                }
                return Err(e);
            }
            Ok((trip, output))
        })
        .await
    }

    // ------------------------------------------------------------------
    // Trips
    // ------------------------------------------------------------------

    /// Creates a trip owned by the caller, with a single empty day.
    ///
    /// # Errors
    ///
    /// Returns `JourneyError::NotAuthorized` for anonymous callers
    /// Returns `JourneyError::InvalidInput` if the trip does not validate
    pub async fn create_trip(&self, caller: Caller, params: CreateTrip) -> Result<Trip> {
        let creator_id = caller.user_id().ok_or(JourneyError::NotAuthorized)?;

        let mut trip = Trip::new(creator_id, params.title);
        trip.start_date = params.start_date;
        trip.end_date = params.end_date;
        trip.destination = params.destination;
        if let Some(visibility) = params.visibility {
            trip.visibility = visibility;
        }
        trip.validate()?;

        self.with_database(move |db| {
            if db.get_user(creator_id)?.is_none() {
                return Err(JourneyError::NotAuthorized);
            }
            db.insert_trip(&mut trip)?;
            Ok(trip)
        })
        .await
    }

    pub async fn get_trip(&self, caller: Caller, trip_id: Uuid) -> Result<Trip> {
        self.read_trip(caller, trip_id).await
    }

    /// Updates title, dates, destination and visibility. Only the provided
    /// fields change.
    pub async fn update_trip(&self, caller: Caller, trip_id: Uuid, params: UpdateTrip) -> Result<Trip> {
        let (trip, ()) = self
            .modify_trip(caller, trip_id, move |trip| trip.apply_update(params))
            .await?;
        Ok(trip)
    }

    /// Deletes a trip with all its ideas and plan.
    pub async fn delete_trip(&self, caller: Caller, trip_id: Uuid) -> Result<()> {
        self.with_database(move |db| {
            let trip = load_trip(db, trip_id)?;
            check_access(caller, &trip, Operation::Write)?;

            if db.delete_trip(trip_id)? {
                Ok(())
            } else {
                Err(JourneyError::not_found(Resource::Trip, trip_id))
            }
        })
        .await
    }

    /// Lists the trips a user created, newest first. Only the user may list
    /// their own trips.
    pub async fn list_trips(&self, caller: Caller, user_id: Uuid, page: Page) -> Result<Vec<Trip>> {
        ensure_self(caller, user_id)?;
        let (limit, offset) = page.limit_offset(DEFAULT_TRIP_COUNT);

        self.with_database(move |db| db.list_trips(user_id, limit, offset))
            .await
    }

    // ------------------------------------------------------------------
    // Ideas
    // ------------------------------------------------------------------

    pub async fn list_ideas(&self, caller: Caller, trip_id: Uuid) -> Result<Vec<Idea>> {
        Ok(self.read_trip(caller, trip_id).await?.ideas)
    }

    /// Adds an idea, newest first unless an index is given. Returns the
    /// updated trip and the id of the new idea.
    pub async fn add_idea(
        &self,
        caller: Caller,
        trip_id: Uuid,
        params: NewIdea,
    ) -> Result<(Trip, Uuid)> {
        self.modify_trip(caller, trip_id, move |trip| trip.add_idea(params).map(|idea| idea.id))
            .await
    }

    pub async fn update_idea(
        &self,
        caller: Caller,
        trip_id: Uuid,
        idea_id: Uuid,
        params: UpdateIdea,
    ) -> Result<Trip> {
        let (trip, _) = self
            .modify_trip(caller, trip_id, move |trip| trip.update_idea(idea_id, params))
            .await?;
        Ok(trip)
    }

    pub async fn remove_idea(&self, caller: Caller, trip_id: Uuid, idea_id: Uuid) -> Result<Trip> {
        let (trip, _) = self
            .modify_trip(caller, trip_id, move |trip| trip.remove_idea(idea_id))
            .await?;
        Ok(trip)
    }

    pub async fn clear_ideas(&self, caller: Caller, trip_id: Uuid) -> Result<Trip> {
        let (trip, ()) = self
            .modify_trip(caller, trip_id, |trip| {
                trip.clear_ideas();
                Ok(())
            })
            .await?;
        Ok(trip)
    }

    // ------------------------------------------------------------------
    // Plan days
    // ------------------------------------------------------------------

    pub async fn get_plan(&self, caller: Caller, trip_id: Uuid) -> Result<Vec<Day>> {
        Ok(self.read_trip(caller, trip_id).await?.plan)
    }

    /// Appends an empty day to the plan.
    pub async fn add_day(&self, caller: Caller, trip_id: Uuid) -> Result<Trip> {
        let (trip, ()) = self
            .modify_trip(caller, trip_id, |trip| {
                trip.add_day();
                Ok(())
            })
            .await?;
        Ok(trip)
    }

    /// Returns a day together with its current position in the plan.
    pub async fn get_day(&self, caller: Caller, trip_id: Uuid, day_id: Uuid) -> Result<(usize, Day)> {
        let trip = self.read_trip(caller, trip_id).await?;
        let index = crate::ordering::require_position(&trip.plan, day_id)?;
        let day = trip.plan.into_iter().nth(index).ok_or_else(|| {
            JourneyError::not_found(Resource::Day, day_id)
        })?;
        Ok((index, day))
    }

    /// Updates a day's lodging and/or position. Returns the day and its new
    /// position.
    pub async fn update_day(
        &self,
        caller: Caller,
        trip_id: Uuid,
        day_id: Uuid,
        params: UpdateDay,
    ) -> Result<(usize, Day)> {
        let (trip, index) = self
            .modify_trip(caller, trip_id, move |trip| trip.update_day(day_id, params))
            .await?;
        let day = trip
            .plan
            .into_iter()
            .nth(index)
            .ok_or_else(|| JourneyError::not_found(Resource::Day, day_id))?;
        Ok((index, day))
    }

    pub async fn remove_day(&self, caller: Caller, trip_id: Uuid, day_id: Uuid) -> Result<Trip> {
        let (trip, _) = self
            .modify_trip(caller, trip_id, move |trip| trip.remove_day(day_id))
            .await?;
        Ok(trip)
    }

    // ------------------------------------------------------------------
    // Plan entries
    // ------------------------------------------------------------------

    /// Schedules an entry in a day, directly or by promoting an idea.
    /// Returns the day the entry was added to.
    pub async fn add_plan_entry(
        &self,
        caller: Caller,
        trip_id: Uuid,
        day_id: Uuid,
        params: NewPlanEntry,
    ) -> Result<Day> {
        let (trip, ()) = self
            .modify_trip(caller, trip_id, move |trip| {
                trip.add_plan_entry(day_id, params).map(|_| ())
            })
            .await?;
        trip.day(day_id).cloned()
    }

    /// Updates an entry and moves it within its day or into another day.
    /// Returns the day that holds the entry afterwards.
    pub async fn update_plan_entry(
        &self,
        caller: Caller,
        trip_id: Uuid,
        day_id: Uuid,
        entry_id: Uuid,
        params: UpdatePlanEntry,
    ) -> Result<Day> {
        let (trip, holder) = self
            .modify_trip(caller, trip_id, move |trip| {
                trip.update_plan_entry(day_id, entry_id, params)
            })
            .await?;
        trip.day(holder).cloned()
    }

    /// Removes an entry, turning it back into an idea unless told not to.
    pub async fn remove_plan_entry(
        &self,
        caller: Caller,
        trip_id: Uuid,
        day_id: Uuid,
        entry_id: Uuid,
        options: RemovePlanEntry,
    ) -> Result<Trip> {
        let (trip, _) = self
            .modify_trip(caller, trip_id, move |trip| {
                trip.remove_plan_entry(day_id, entry_id, options)
            })
            .await?;
        Ok(trip)
    }
}

/// Account-scoped reads and writes are only allowed on the caller's own
/// account.
pub(crate) fn ensure_self(caller: Caller, user_id: Uuid) -> Result<()> {
    match caller {
        Caller::User(id) if id == user_id => Ok(()),
        Caller::User(_) => Err(JourneyError::Forbidden {
            reason: "Cannot access another user's account".to_string(),
        }),
        Caller::Anonymous => Err(JourneyError::NotAuthorized),
    }
}
