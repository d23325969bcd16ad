//! Data models for trips, itineraries, users and journal entries.
//!
//! A [`Trip`] is an aggregate: its [`Idea`]s, its plan of [`Day`]s and each
//! day's [`PlanEntry`]s live inside the trip document and are loaded and
//! written together. Ideas and plan entries share a [`PlaceDetails`] record,
//! which is the only thing copied when an idea is promoted into the plan or
//! a plan entry is demoted back into the ideas list.
//!
//! All models serialize with camelCase field names, which is the wire format
//! of the HTTP API.
//!
//! # Examples
//!
//! ```rust
//! use journey_core::models::{Location, PlaceDetails, Trip, Visibility};
//! use uuid::Uuid;
//!
//! let trip = Trip::new(Uuid::new_v4(), "Lisbon long weekend");
//! assert_eq!(trip.visibility, Visibility::Public);
//! assert_eq!(trip.plan.len(), 1);
//!
//! let place = PlaceDetails::new("p-1", "Time Out Market", Location::point(-9.14, 38.71));
//! assert!(place.validate().is_ok());
//! ```

pub mod day;
pub mod idea;
pub mod journal;
pub mod place;
pub mod status;
pub mod trip;
pub mod user;


pub use day::{Day, PlanEntry};
pub use idea::Idea;
pub use journal::JournalEntry;
pub use place::{Destination, Location, Lodging, PlaceDetails, Viewport};
pub use status::{EntryStatus, IdeaCategory, JournalEntryKind, Visibility};
pub use trip::Trip;
pub use user::User;
