//! Itinerary day and plan entry models.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EntryStatus, Idea, Lodging, PlaceDetails};

/// One slot in a trip's ordered plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    /// Unique identifier for the day
    pub id: Uuid,

    /// Scheduled visits in display order
    #[serde(default)]
    pub entries: Vec<PlanEntry>,

    #[serde(default)]
    pub lodging: Lodging,
}

impl Day {
    /// An empty day with no entries and no lodging.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            entries: Vec::new(),
            lodging: Lodging::default(),
        }
    }
}

impl Default for Day {
    fn default() -> Self {
        Self::new()
    }
}

/// A scheduled visit within a day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntry {
    /// Unique identifier for the entry
    pub id: Uuid,

    /// Timestamp when the entry was scheduled (UTC)
    pub created_at: Timestamp,

    #[serde(flatten)]
    pub place: PlaceDetails,

    #[serde(default)]
    pub status: EntryStatus,
}

impl PlanEntry {
    pub fn new(place: PlaceDetails) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Timestamp::now(),
            place,
            status: EntryStatus::default(),
        }
    }

    /// Promotes an idea to a plan entry, copying the shared place fields.
    pub fn from_idea(idea: &Idea) -> Self {
        Self::new(idea.place.clone())
    }
}
