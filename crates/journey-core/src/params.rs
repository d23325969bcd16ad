//! Parameter structures for Journey operations.
//!
//! These are the request shapes shared by the service layer and the HTTP
//! surface. They deserialize straight from the camelCase JSON bodies the
//! API accepts, so the server can hand them to [`crate::Journey`] without
//! a second set of wrapper types.
//!
//! Positions (`index`) are signed so that negative values coming from
//! clients are reported as invalid positions instead of failing to parse.

use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::models::{
    Destination, EntryStatus, IdeaCategory, JournalEntryKind, Location, Lodging, PlaceDetails,
    Visibility,
};

/// Trips per page when the caller does not say.
pub const DEFAULT_TRIP_COUNT: u32 = 10;

/// Journal entries per page when the caller does not say.
pub const DEFAULT_ENTRY_COUNT: u32 = 20;

/// Parameters for creating a new trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTrip {
    /// Title of the trip (required)
    pub title: String,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub destination: Option<Destination>,
    /// Defaults to public
    pub visibility: Option<Visibility>,
}

/// Parameters for updating trip metadata. Only provided fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTrip {
    pub title: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub destination: Option<Destination>,
    pub visibility: Option<Visibility>,
}

/// Parameters for adding an idea to a trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIdea {
    #[serde(flatten)]
    pub place: PlaceDetails,
    /// Inferred from the place types when absent
    pub category: Option<IdeaCategory>,
    /// Position in the ideas list; new ideas go first by default
    pub index: Option<i64>,
}

/// Parameters for updating an idea: comment, category and/or position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIdea {
    pub comment: Option<String>,
    pub category: Option<IdeaCategory>,
    pub index: Option<i64>,
}

/// Parameters for updating a plan day: lodging and/or position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDay {
    pub lodging: Option<Lodging>,
    pub index: Option<i64>,
}

/// Parameters for scheduling a plan entry.
///
/// Either `idea` names an existing idea to promote, or the place fields are
/// given directly. When both are present the idea wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlanEntry {
    pub idea: Option<Uuid>,
    #[serde(flatten)]
    pub place: Option<PlaceDetails>,
    /// Position in the day's entries, default end
    pub index: Option<i64>,
}

/// Parameters for updating a plan entry.
///
/// A `day_id` different from the entry's current day moves the entry into
/// that day at `index` (default end). Otherwise `index` reorders the entry
/// within its day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlanEntry {
    pub comment: Option<String>,
    pub status: Option<EntryStatus>,
    pub day_id: Option<Uuid>,
    pub index: Option<i64>,
}

/// Options for removing a plan entry.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovePlanEntry {
    /// Skip turning the removed entry back into an idea. Query strings set
    /// it with any non-empty value other than `false` or `0`.
    #[serde(default, deserialize_with = "flag")]
    pub ignore_idea_create: bool,
}

/// Parameters for creating an account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignUp {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub name: Option<String>,
    pub username: Option<String>,
}

/// Login by username or email.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Login {
    pub username: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub password: String,
}

/// Parameters for updating an account. Only provided fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub username: Option<String>,
}

/// Parameters for recording a journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJournalEntry {
    #[serde(rename = "type")]
    pub kind: JournalEntryKind,
    pub message: Option<String>,
    /// A single URL or a list of URLs
    #[serde(default, deserialize_with = "one_or_many")]
    pub contents: Vec<String>,
    #[serde(alias = "loc")]
    pub location: Option<Location>,
}

/// Pagination for listings. Pages start at 1.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Page {
    pub count: Option<u32>,
    pub page: Option<u32>,
}

impl Page {
    /// Resolves the page size (falling back to `default_count`) and the
    /// number of rows to skip.
    pub fn limit_offset(&self, default_count: u32) -> (u32, u32) {
        let count = self.count.filter(|c| *c > 0).unwrap_or(default_count);
        let page = self.page.filter(|p| *p > 0).unwrap_or(1);
        (count, count.saturating_mul(page - 1))
    }

    pub fn number(&self) -> u32 {
        self.page.filter(|p| *p > 0).unwrap_or(1)
    }
}

/// Journal listing query: pagination plus an optional upper date bound.
///
/// Kept flat (no nested [`Page`]) because query strings cannot carry
/// flattened numeric fields.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListJournalEntries {
    pub count: Option<u32>,
    pub page: Option<u32>,
    /// Only entries strictly older than this
    pub max_date: Option<Timestamp>,
}

impl ListJournalEntries {
    pub fn page(&self) -> Page {
        Page {
            count: self.count,
            page: self.page,
        }
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(url)) => vec![url],
        Some(OneOrMany::Many(urls)) => urls,
    })
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Number(i64),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        None => false,
        Some(Flag::Bool(set)) => set,
        Some(Flag::Number(n)) => n != 0,
        Some(Flag::Text(text)) => {
            let text = text.trim();
            !(text.is_empty() || text == "0" || text.eq_ignore_ascii_case("false"))
        }
    })
}
