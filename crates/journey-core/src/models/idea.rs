//! Idea model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{IdeaCategory, PlaceDetails, PlanEntry};

/// A candidate place the traveller may want to visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    /// Unique identifier for the idea
    pub id: Uuid,

    /// Timestamp when the idea was added (UTC)
    pub created_at: Timestamp,

    #[serde(flatten)]
    pub place: PlaceDetails,

    #[serde(default)]
    pub category: IdeaCategory,
}

impl Idea {
    /// Creates an idea with a fresh id. Without an explicit category one is
    /// inferred from the place types.
    pub fn new(place: PlaceDetails, category: Option<IdeaCategory>) -> Self {
        let category = category.unwrap_or_else(|| IdeaCategory::infer(&place.types));
        Self {
            id: Uuid::new_v4(),
            created_at: Timestamp::now(),
            place,
            category,
        }
    }

    /// Demotes a plan entry back to an idea. Only the shared place fields
    /// carry over; the idea gets a new id and the default category.
    pub fn from_plan_entry(entry: &PlanEntry) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Timestamp::now(),
            place: entry.place.clone(),
            category: IdeaCategory::default(),
        }
    }
}
