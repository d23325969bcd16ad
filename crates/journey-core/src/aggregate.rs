//! In-memory mutations of a trip aggregate.
//!
//! Each method checks every precondition before it touches the trip, so an
//! `Err` always leaves the aggregate as it was. Writes to `ideas` always end
//! with `ideaCategories` recomputed.

use uuid::Uuid;

use crate::{
    error::{JourneyError, Result},
    models::{Day, Idea, PlanEntry, Trip},
    ordering::{self, insertion_point, reorder_target, require_position},
    params::{NewIdea, NewPlanEntry, RemovePlanEntry, UpdateDay, UpdateIdea, UpdatePlanEntry, UpdateTrip},
};

impl Trip {
    /// Applies metadata changes. The resulting trip must still validate.
    pub fn apply_update(&mut self, params: UpdateTrip) -> Result<()> {
        let title = params.title.unwrap_or_else(|| self.title.clone());
        let start_date = params.start_date.or(self.start_date);
        let end_date = params.end_date.or(self.end_date);

        if title.trim().is_empty() {
            return Err(JourneyError::invalid_input("title").with_reason("Trip is missing a title"));
        }
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                return Err(JourneyError::invalid_input("endDate")
                    .with_reason("Trip end date is before start date"));
            }
        }
        if let Some(destination) = &params.destination {
            destination.validate()?;
        }

        self.title = title;
        self.start_date = start_date;
        self.end_date = end_date;
        if let Some(destination) = params.destination {
            self.destination = Some(destination);
        }
        if let Some(visibility) = params.visibility {
            self.visibility = visibility;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Ideas
    // ------------------------------------------------------------------

    /// Adds an idea, by default at the top of the list.
    pub fn add_idea(&mut self, params: NewIdea) -> Result<&Idea> {
        params.place.validate()?;

        let idea = Idea::new(params.place, params.category);
        let pos = ordering::insert(&mut self.ideas, idea, Some(params.index.unwrap_or(0)))?;
        self.refresh_idea_categories();
        Ok(&self.ideas[pos])
    }

    pub fn idea(&self, idea_id: Uuid) -> Result<&Idea> {
        let pos = require_position(&self.ideas, idea_id)?;
        Ok(&self.ideas[pos])
    }

    /// Updates an idea's comment and category and optionally moves it.
    pub fn update_idea(&mut self, idea_id: Uuid, params: UpdateIdea) -> Result<usize> {
        let current = require_position(&self.ideas, idea_id)?;
        reorder_target(self.ideas.len(), current, params.index)?;

        let idea = &mut self.ideas[current];
        if let Some(comment) = params.comment {
            idea.place.comment = Some(comment);
        }
        if let Some(category) = params.category {
            idea.category = category;
        }

        let pos = ordering::reorder(&mut self.ideas, current, params.index)?;
        self.refresh_idea_categories();
        Ok(pos)
    }

    pub fn remove_idea(&mut self, idea_id: Uuid) -> Result<Idea> {
        let pos = require_position(&self.ideas, idea_id)?;
        let idea = self.ideas.remove(pos);
        self.refresh_idea_categories();
        Ok(idea)
    }

    pub fn clear_ideas(&mut self) {
        self.ideas.clear();
        self.refresh_idea_categories();
    }

    // ------------------------------------------------------------------
    // Plan days
    // ------------------------------------------------------------------

    /// Appends an empty day to the plan.
    pub fn add_day(&mut self) -> &Day {
        self.plan.push(Day::new());
        &self.plan[self.plan.len() - 1]
    }

    pub fn day(&self, day_id: Uuid) -> Result<&Day> {
        let pos = require_position(&self.plan, day_id)?;
        Ok(&self.plan[pos])
    }

    /// Replaces a day's lodging and optionally moves the day. Returns the
    /// day's position afterwards.
    pub fn update_day(&mut self, day_id: Uuid, params: UpdateDay) -> Result<usize> {
        let current = require_position(&self.plan, day_id)?;
        reorder_target(self.plan.len(), current, params.index)?;

        if let Some(lodging) = params.lodging {
            self.plan[current].lodging = lodging;
        }

        ordering::reorder(&mut self.plan, current, params.index)
    }

    pub fn remove_day(&mut self, day_id: Uuid) -> Result<Day> {
        let pos = require_position(&self.plan, day_id)?;
        Ok(self.plan.remove(pos))
    }

    // ------------------------------------------------------------------
    // Plan entries
    // ------------------------------------------------------------------

    /// Schedules an entry into a day, either from place fields or by
    /// promoting an existing idea (which is removed from the ideas list).
    pub fn add_plan_entry(&mut self, day_id: Uuid, params: NewPlanEntry) -> Result<&PlanEntry> {
        let day_pos = require_position(&self.plan, day_id)?;
        insertion_point(self.plan[day_pos].entries.len(), params.index)?;

        let entry = match (params.idea, params.place) {
            (Some(idea_id), _) => {
                let idea_pos = require_position(&self.ideas, idea_id)?;
                let idea = self.ideas.remove(idea_pos);
                self.refresh_idea_categories();
                PlanEntry::from_idea(&idea)
            }
            (None, Some(place)) => {
                place.validate()?;
                PlanEntry::new(place)
            }
            (None, None) => {
                return Err(JourneyError::invalid_input("placeId")
                    .with_reason("Either an idea or the place fields are required"));
            }
        };

        let entries = &mut self.plan[day_pos].entries;
        let pos = ordering::insert(entries, entry, params.index)?;
        Ok(&entries[pos])
    }

    pub fn plan_entry(&self, day_id: Uuid, entry_id: Uuid) -> Result<&PlanEntry> {
        let day = self.day(day_id)?;
        let pos = require_position(&day.entries, entry_id)?;
        Ok(&day.entries[pos])
    }

    /// Updates an entry's comment and status, then either moves it to
    /// another day or reorders it within its own day. Returns the id of the
    /// day holding the entry afterwards.
    pub fn update_plan_entry(
        &mut self,
        day_id: Uuid,
        entry_id: Uuid,
        params: UpdatePlanEntry,
    ) -> Result<Uuid> {
        let day_pos = require_position(&self.plan, day_id)?;
        let entry_pos = require_position(&self.plan[day_pos].entries, entry_id)?;

        let destination = match params.day_id {
            Some(target) if target != day_id => Some(
                ordering::position_of(&self.plan, target)
                    .ok_or(JourneyError::TargetNotFound {
                        id: target.to_string(),
                    })?,
            ),
            _ => None,
        };

        match destination {
            Some(dest_pos) => {
                insertion_point(self.plan[dest_pos].entries.len(), params.index)?;
            }
            None => {
                reorder_target(self.plan[day_pos].entries.len(), entry_pos, params.index)?;
            }
        }

        let entry = &mut self.plan[day_pos].entries[entry_pos];
        if let Some(comment) = params.comment {
            entry.place.comment = Some(comment);
        }
        if let Some(status) = params.status {
            entry.status = status;
        }

        match destination {
            Some(dest_pos) => {
                let (source, target) = ordering::pair_mut(&mut self.plan, day_pos, dest_pos)
                    .ok_or(JourneyError::TargetNotFound {
                        id: day_id.to_string(),
                    })?;
                ordering::relocate(&mut source.entries, &mut target.entries, entry_id, params.index)?;
                Ok(target.id)
            }
            None => {
                ordering::reorder(&mut self.plan[day_pos].entries, entry_pos, params.index)?;
                Ok(day_id)
            }
        }
    }

    /// Removes an entry from its day. Unless told otherwise the entry's
    /// place goes back to the top of the ideas list.
    pub fn remove_plan_entry(
        &mut self,
        day_id: Uuid,
        entry_id: Uuid,
        options: RemovePlanEntry,
    ) -> Result<PlanEntry> {
        let day_pos = require_position(&self.plan, day_id)?;
        let entry_pos = require_position(&self.plan[day_pos].entries, entry_id)?;

        let entry = self.plan[day_pos].entries.remove(entry_pos);

        if !options.ignore_idea_create {
            ordering::insert(&mut self.ideas, Idea::from_plan_entry(&entry), Some(0))?;
            self.refresh_idea_categories();
        }

        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::{EntryStatus, IdeaCategory, Location, Lodging, PlaceDetails, Visibility};

    fn place(name: &str) -> PlaceDetails {
        PlaceDetails::new(format!("gp-{name}"), name, Location::point(139.69, 35.68))
    }

    fn new_idea(name: &str, category: IdeaCategory) -> NewIdea {
        NewIdea {
            place: place(name),
            category: Some(category),
            index: None,
        }
    }

    fn idea_names(trip: &Trip) -> Vec<&str> {
        trip.ideas.iter().map(|i| i.place.name.as_str()).collect()
    }

    fn entry_names(day: &Day) -> Vec<&str> {
        day.entries.iter().map(|e| e.place.name.as_str()).collect()
    }

    /// Trip with ideas [A, B, C] in that order.
    fn trip_with_ideas() -> Trip {
        let mut trip = Trip::new(Uuid::new_v4(), "Tokyo");
        for name in ["C", "B", "A"] {
            trip.add_idea(new_idea(name, IdeaCategory::Place)).unwrap();
        }
        trip
    }

    fn schedule(trip: &mut Trip, day_id: Uuid, name: &str) -> Uuid {
        trip.add_plan_entry(
            day_id,
            NewPlanEntry {
                place: Some(place(name)),
                ..Default::default()
            },
        )
        .unwrap()
        .id
    }

    #[test]
    fn test_add_idea_prepends_by_default() {
        let trip = trip_with_ideas();
        assert_eq!(idea_names(&trip), ["A", "B", "C"]);
    }

    #[test]
    fn test_add_idea_at_index() {
        let mut trip = trip_with_ideas();
        let mut params = new_idea("Z", IdeaCategory::Food);
        params.index = Some(3);
        trip.add_idea(params).unwrap();

        assert_eq!(idea_names(&trip), ["A", "B", "C", "Z"]);
        assert_eq!(trip.idea_categories, [IdeaCategory::Food, IdeaCategory::Place]);
    }

    #[test]
    fn test_add_idea_rejects_missing_name() {
        let mut trip = Trip::new(Uuid::new_v4(), "Tokyo");
        let err = trip
            .add_idea(new_idea("", IdeaCategory::Place))
            .unwrap_err();
        assert!(matches!(err, JourneyError::InvalidInput { .. }));
        assert!(trip.ideas.is_empty());
    }

    #[test]
    fn test_reorder_ideas_scenario() {
        let mut trip = trip_with_ideas();
        let b = trip.ideas[1].id;
        let c = trip.ideas[2].id;

        trip.update_idea(
            b,
            UpdateIdea {
                index: Some(0),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(idea_names(&trip), ["B", "A", "C"]);

        let err = trip
            .update_idea(
                c,
                UpdateIdea {
                    index: Some(5),
                    comment: Some("should not stick".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, JourneyError::InvalidIndex { index: 5, len: 3 }));
        assert_eq!(idea_names(&trip), ["B", "A", "C"]);
        assert!(trip.ideas[2].place.comment.is_none());
    }

    #[test]
    fn test_update_idea_category_refreshes_categories() {
        let mut trip = trip_with_ideas();
        let a = trip.ideas[0].id;

        trip.update_idea(
            a,
            UpdateIdea {
                category: Some(IdeaCategory::Shopping),
                comment: Some("souvenirs".to_string()),
                index: None,
            },
        )
        .unwrap();

        assert_eq!(
            trip.idea_categories,
            [IdeaCategory::Place, IdeaCategory::Shopping]
        );
        assert_eq!(trip.ideas[0].place.comment.as_deref(), Some("souvenirs"));
    }

    #[test]
    fn test_remove_and_clear_ideas_refresh_categories() {
        let mut trip = Trip::new(Uuid::new_v4(), "Tokyo");
        let food = trip.add_idea(new_idea("Ramen", IdeaCategory::Food)).unwrap().id;
        trip.add_idea(new_idea("Shrine", IdeaCategory::Sightseeing))
            .unwrap();

        trip.remove_idea(food).unwrap();
        assert_eq!(trip.idea_categories, [IdeaCategory::Sightseeing]);

        assert!(matches!(
            trip.remove_idea(food),
            Err(JourneyError::NotFound { .. })
        ));

        trip.clear_ideas();
        assert!(trip.ideas.is_empty());
        assert!(trip.idea_categories.is_empty());
    }

    #[test]
    fn test_update_trip_validates_before_applying() {
        let mut trip = Trip::new(Uuid::new_v4(), "Tokyo");
        trip.start_date = Some(Timestamp::from_second(1_700_000_000).unwrap());

        let err = trip
            .apply_update(UpdateTrip {
                title: Some("Osaka".to_string()),
                end_date: Some(Timestamp::from_second(1_600_000_000).unwrap()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, JourneyError::InvalidInput { .. }));
        assert_eq!(trip.title, "Tokyo");
        assert!(trip.end_date.is_none());

        trip.apply_update(UpdateTrip {
            visibility: Some(Visibility::Private),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(trip.visibility, Visibility::Private);
        assert_eq!(trip.title, "Tokyo");
    }

    #[test]
    fn test_days_add_reorder_remove() {
        let mut trip = Trip::new(Uuid::new_v4(), "Tokyo");
        let first = trip.plan[0].id;
        let second = trip.add_day().id;
        let third = trip.add_day().id;

        let pos = trip
            .update_day(
                third,
                UpdateDay {
                    lodging: Some(Lodging {
                        name: Some("Ryokan".to_string()),
                        ..Default::default()
                    }),
                    index: Some(0),
                },
            )
            .unwrap();
        assert_eq!(pos, 0);
        let order: Vec<Uuid> = trip.plan.iter().map(|d| d.id).collect();
        assert_eq!(order, [third, first, second]);
        assert_eq!(trip.plan[0].lodging.name.as_deref(), Some("Ryokan"));

        assert!(matches!(
            trip.update_day(first, UpdateDay { lodging: None, index: Some(3) }),
            Err(JourneyError::InvalidIndex { .. })
        ));

        trip.remove_day(first).unwrap();
        assert_eq!(trip.plan.len(), 2);
        assert!(trip.day(first).is_err());
    }

    #[test]
    fn test_promote_idea_into_day() {
        let mut trip = trip_with_ideas();
        let day = trip.plan[0].id;
        let b = trip.ideas[1].clone();

        let entry = trip
            .add_plan_entry(
                day,
                NewPlanEntry {
                    idea: Some(b.id),
                    ..Default::default()
                },
            )
            .unwrap()
            .clone();

        assert_eq!(entry.place, b.place);
        assert_eq!(idea_names(&trip), ["A", "C"]);
        assert_eq!(trip.plan[0].entries.len(), 1);
    }

    #[test]
    fn test_promote_with_bad_index_keeps_idea() {
        let mut trip = trip_with_ideas();
        let day = trip.plan[0].id;
        let a = trip.ideas[0].id;

        let err = trip
            .add_plan_entry(
                day,
                NewPlanEntry {
                    idea: Some(a),
                    index: Some(1),
                    ..Default::default()
                },
            )
            .unwrap_err();

        assert!(matches!(err, JourneyError::InvalidIndex { index: 1, len: 0 }));
        assert_eq!(idea_names(&trip), ["A", "B", "C"]);
        assert!(trip.plan[0].entries.is_empty());
    }

    #[test]
    fn test_promote_unknown_idea() {
        let mut trip = trip_with_ideas();
        let day = trip.plan[0].id;

        let err = trip
            .add_plan_entry(
                day,
                NewPlanEntry {
                    idea: Some(Uuid::new_v4()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, JourneyError::NotFound { .. }));
        assert_eq!(trip.ideas.len(), 3);
    }

    #[test]
    fn test_plan_entry_requires_idea_or_place() {
        let mut trip = Trip::new(Uuid::new_v4(), "Tokyo");
        let day = trip.plan[0].id;
        assert!(trip.add_plan_entry(day, NewPlanEntry::default()).is_err());
    }

    #[test]
    fn test_entries_insert_at_index() {
        let mut trip = Trip::new(Uuid::new_v4(), "Tokyo");
        let day = trip.plan[0].id;
        schedule(&mut trip, day, "one");
        schedule(&mut trip, day, "three");

        trip.add_plan_entry(
            day,
            NewPlanEntry {
                place: Some(place("two")),
                index: Some(1),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(entry_names(&trip.plan[0]), ["one", "two", "three"]);
    }

    #[test]
    fn test_update_entry_status_and_reorder() {
        let mut trip = Trip::new(Uuid::new_v4(), "Tokyo");
        let day = trip.plan[0].id;
        schedule(&mut trip, day, "one");
        let two = schedule(&mut trip, day, "two");

        let holder = trip
            .update_plan_entry(
                day,
                two,
                UpdatePlanEntry {
                    status: Some(EntryStatus::Visited),
                    index: Some(0),
                    day_id: Some(day),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(holder, day);
        assert_eq!(entry_names(&trip.plan[0]), ["two", "one"]);
        assert_eq!(trip.plan[0].entries[0].status, EntryStatus::Visited);
    }

    #[test]
    fn test_move_entry_between_days() {
        let mut trip = Trip::new(Uuid::new_v4(), "Tokyo");
        let monday = trip.plan[0].id;
        let tuesday = trip.add_day().id;
        let moving = schedule(&mut trip, monday, "market");
        schedule(&mut trip, tuesday, "tower");

        let holder = trip
            .update_plan_entry(
                monday,
                moving,
                UpdatePlanEntry {
                    day_id: Some(tuesday),
                    index: Some(0),
                    comment: Some("early".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(holder, tuesday);
        assert!(trip.plan[0].entries.is_empty());
        assert_eq!(entry_names(&trip.plan[1]), ["market", "tower"]);
        assert_eq!(trip.plan[1].entries[0].place.comment.as_deref(), Some("early"));
    }

    #[test]
    fn test_move_entry_to_missing_day() {
        let mut trip = Trip::new(Uuid::new_v4(), "Tokyo");
        let monday = trip.plan[0].id;
        let entry = schedule(&mut trip, monday, "market");

        let err = trip
            .update_plan_entry(
                monday,
                entry,
                UpdatePlanEntry {
                    day_id: Some(Uuid::new_v4()),
                    status: Some(EntryStatus::Visited),
                    ..Default::default()
                },
            )
            .unwrap_err();

        assert!(matches!(err, JourneyError::TargetNotFound { .. }));
        assert_eq!(entry_names(&trip.plan[0]), ["market"]);
        assert_eq!(trip.plan[0].entries[0].status, EntryStatus::Planned);
    }

    #[test]
    fn test_remove_entry_demotes_to_idea() {
        let mut trip = trip_with_ideas();
        let day = trip.plan[0].id;
        let original = trip.ideas[2].clone();

        let entry_id = trip
            .add_plan_entry(
                day,
                NewPlanEntry {
                    idea: Some(original.id),
                    ..Default::default()
                },
            )
            .unwrap()
            .id;

        trip.remove_plan_entry(day, entry_id, RemovePlanEntry::default())
            .unwrap();

        assert!(trip.plan[0].entries.is_empty());
        assert_eq!(idea_names(&trip), ["C", "A", "B"]);
        let restored = &trip.ideas[0];
        assert_eq!(restored.place.place_id, original.place.place_id);
        assert_eq!(restored.place.name, original.place.name);
        assert_eq!(restored.place.location, original.place.location);
        assert_ne!(restored.id, original.id);
    }

    #[test]
    fn test_remove_entry_ignoring_idea_create() {
        let mut trip = Trip::new(Uuid::new_v4(), "Tokyo");
        let day = trip.plan[0].id;
        let entry = schedule(&mut trip, day, "tower");

        trip.remove_plan_entry(
            day,
            entry,
            RemovePlanEntry {
                ignore_idea_create: true,
            },
        )
        .unwrap();

        assert!(trip.ideas.is_empty());
        assert!(trip.plan_entry(day, entry).is_err());
    }
}
