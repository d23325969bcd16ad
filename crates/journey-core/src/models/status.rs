//! Enumerations for trip visibility, idea categories and entry states.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Who may see a trip.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    /// Anyone may read, only the creator may modify
    #[default]
    Public,

    /// Only the creator may read or modify
    Private,

    /// Anyone may read, only the creator may modify
    ViewOnly,
}

/// Category of a trip idea.
///
/// Ordering follows the alphabetical order of the names, which is the order
/// `ideaCategories` is reported in.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub enum IdeaCategory {
    Food,
    Lodging,
    Nightlife,
    #[default]
    Place,
    Recreation,
    Shopping,
    Sightseeing,
    Transportation,
}

impl IdeaCategory {
    /// Maps a place type tag (as reported by the places provider) to a
    /// category. Unknown tags fall back to [`IdeaCategory::Place`].
    pub fn from_place_type(place_type: &str) -> Self {
        match place_type {
            "bakery" | "cafe" | "food" | "meal_delivery" | "meal_takeaway" | "restaurant" => {
                IdeaCategory::Food
            }
            "lodging" => IdeaCategory::Lodging,
            "bar" | "night_club" => IdeaCategory::Nightlife,
            "amusement_park" | "aquarium" | "art_gallery" | "campground" | "museum" | "park"
            | "spa" | "stadium" | "zoo" => IdeaCategory::Recreation,
            "book_store" | "clothing_store" | "department_store" | "furniture_store"
            | "shopping_mall" | "store" => IdeaCategory::Shopping,
            "establishment" | "locality" | "natural_feature" | "place_of_worship" | "premise"
            | "point_of_interest" | "subpremise" => IdeaCategory::Sightseeing,
            "airport" | "bus_station" | "taxi_stand" | "train_station" | "transit_station" => {
                IdeaCategory::Transportation
            }
            _ => IdeaCategory::Place,
        }
    }

    /// Category for a freshly added idea: the first place type decides,
    /// no types means `Place`.
    pub fn infer(types: &[String]) -> Self {
        types
            .first()
            .map(|t| Self::from_place_type(t))
            .unwrap_or_default()
    }
}

/// Progress of a scheduled plan entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Not visited yet
    #[default]
    Planned,

    /// Already visited
    Visited,
}

/// Media kind of a journal entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JournalEntryKind {
    Text,
    Photo,
    Video,
    Audio,
}

impl FromStr for JournalEntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(JournalEntryKind::Text),
            "photo" => Ok(JournalEntryKind::Photo),
            "video" => Ok(JournalEntryKind::Video),
            "audio" => Ok(JournalEntryKind::Audio),
            _ => Err(format!("Invalid entry type: {s}")),
        }
    }
}

impl JournalEntryKind {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            JournalEntryKind::Text => "text",
            JournalEntryKind::Photo => "photo",
            JournalEntryKind::Video => "video",
            JournalEntryKind::Audio => "audio",
        }
    }

    /// Whether this kind carries media contents rather than a message.
    pub fn has_media(&self) -> bool {
        !matches!(self, JournalEntryKind::Text)
    }
}
