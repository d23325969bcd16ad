//! Journal entry model.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{JournalEntryKind, Location};

/// A moment recorded by a traveller: a text note or a piece of media.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: Uuid,

    pub creator_id: Uuid,

    /// When the entry was recorded (UTC)
    pub date: Timestamp,

    #[serde(rename = "type")]
    pub kind: JournalEntryKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Media URLs for photo, video and audio entries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contents: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}
