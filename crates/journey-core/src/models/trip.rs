//! Trip model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Day, Destination, Idea, IdeaCategory, Visibility};
use crate::error::{JourneyError, Result};

/// A trip aggregate: metadata plus its ideas and day-by-day plan.
///
/// The whole aggregate is loaded and stored as one unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    /// Unique identifier for the trip
    pub id: Uuid,

    /// Owner of the trip, fixed at creation
    pub creator_id: Uuid,

    /// Timestamp when the trip was created (UTC)
    pub created_at: Timestamp,

    /// Store-managed write counter used for compare-and-swap saves
    #[serde(default)]
    pub revision: u64,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Timestamp>,

    #[serde(default)]
    pub visibility: Visibility,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<Destination>,

    /// Candidate places, in priority order
    #[serde(default)]
    pub ideas: Vec<Idea>,

    /// Sorted, de-duplicated categories present in `ideas`
    #[serde(default)]
    pub idea_categories: Vec<IdeaCategory>,

    /// Itinerary days, in order
    #[serde(default)]
    pub plan: Vec<Day>,
}

impl Trip {
    /// Creates a new public trip with a single empty day.
    pub fn new(creator_id: Uuid, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            creator_id,
            created_at: Timestamp::now(),
            revision: 0,
            title: title.into(),
            start_date: None,
            end_date: None,
            visibility: Visibility::default(),
            destination: None,
            ideas: Vec::new(),
            idea_categories: Vec::new(),
            plan: vec![Day::new()],
        }
    }

    /// Checks the invariants that must hold before the trip is written.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(JourneyError::invalid_input("title").with_reason("Trip is missing a title"));
        }

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(JourneyError::invalid_input("endDate")
                    .with_reason("Trip end date is before start date"));
            }
        }

        if let Some(destination) = &self.destination {
            destination.validate()?;
        }

        Ok(())
    }

    /// Recomputes `idea_categories` from the current ideas.
    pub fn refresh_idea_categories(&mut self) {
        let mut categories: Vec<IdeaCategory> = self.ideas.iter().map(|i| i.category).collect();
        categories.sort();
        categories.dedup();
        self.idea_categories = categories;
    }

    /// Whether the given user created this trip.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.creator_id == user_id
    }
}
