//! Place descriptors shared by ideas, plan entries, lodging and destinations.

use serde::{Deserialize, Serialize};

use crate::error::{JourneyError, Result};

fn point() -> String {
    "Point".to_string()
}

/// A GeoJSON-style point, `coordinates` is `[longitude, latitude]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    #[serde(rename = "type", default = "point")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

impl Location {
    pub fn point(longitude: f64, latitude: f64) -> Self {
        Self {
            kind: point(),
            coordinates: [longitude, latitude],
        }
    }
}

/// The fields an idea and a plan entry have in common.
///
/// Promotion and demotion copy exactly this record, nothing else.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetails {
    /// Identifier of the place at the places provider
    pub place_id: String,

    /// Display name of the place
    pub name: String,

    pub location: Location,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Place type tags, e.g. `restaurant`, `museum`
    #[serde(default)]
    pub types: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Free-form note from the traveller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl PlaceDetails {
    /// Minimal place with only the required fields set.
    pub fn new(place_id: impl Into<String>, name: impl Into<String>, location: Location) -> Self {
        Self {
            place_id: place_id.into(),
            name: name.into(),
            location,
            address: None,
            phone: None,
            types: Vec::new(),
            photo: None,
            url: None,
            comment: None,
        }
    }

    /// Checks the required fields are present.
    pub fn validate(&self) -> Result<()> {
        if self.place_id.trim().is_empty() {
            return Err(JourneyError::invalid_input("placeId").with_reason("Place id is required"));
        }
        if self.name.trim().is_empty() {
            return Err(JourneyError::invalid_input("name").with_reason("Place name is required"));
        }
        Ok(())
    }
}

/// Where the traveller sleeps on a given day. Every field is optional and an
/// unset lodging serializes as `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lodging {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Bounding box of a destination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Viewport {
    pub northeast: Location,
    pub southwest: Location,
}

/// The city or region a trip is heading to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub place_id: String,
    pub name: String,
    pub formatted_address: String,
    pub location: Location,
    pub viewport: Viewport,
    #[serde(default)]
    pub types: Vec<String>,
}

impl Destination {
    pub fn validate(&self) -> Result<()> {
        if self.place_id.trim().is_empty() {
            return Err(JourneyError::invalid_input("destination.placeId")
                .with_reason("Destination place id is required"));
        }
        if self.name.trim().is_empty() {
            return Err(JourneyError::invalid_input("destination.name")
                .with_reason("Destination name is required"));
        }
        Ok(())
    }
}
