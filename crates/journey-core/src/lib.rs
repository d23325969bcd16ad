//! Core library for the Journey travel journal.
//!
//! This crate holds the business logic behind the Journey API: trips with
//! their ordered ideas and day-by-day plans, user accounts and journal
//! entries, stored in SQLite.
//!
//! # Layout
//!
//! - [`models`]: the trip aggregate and the other records, in their wire format
//! - [`ordering`]: insert, reorder and relocate over the ordered lists of a trip
//! - [`access`]: who may read or modify a trip
//! - [`db`]: SQLite persistence with compare-and-swap trip writes
//! - [`journey`]: the async service the HTTP layer calls
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use journey_core::{params::{CreateTrip, SignUp}, Caller, JourneyBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let journey = JourneyBuilder::new()
//!     .with_database_path(Some("journey.db"))
//!     .build()
//!     .await?;
//!
//! let user = journey
//!     .sign_up(SignUp {
//!         email: "ana@example.com".to_string(),
//!         password: "secret1".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let trip = journey
//!     .create_trip(
//!         Caller::User(user.id),
//!         CreateTrip { title: "Kyoto in autumn".to_string(), ..Default::default() },
//!     )
//!     .await?;
//! println!("Created trip {} with {} day(s)", trip.id, trip.plan.len());
//! # Ok(())
//! # }
//! ```

pub mod access;
mod aggregate;
pub mod db;
pub mod error;
pub mod journey;
pub mod models;
pub mod ordering;
pub mod params;
pub mod password;

// Re-export commonly used types
pub use access::{check_access, Caller, Operation};
pub use db::Database;
pub use error::{JourneyError, Resource, Result};
pub use journey::{Journey, JourneyBuilder};
pub use models::{
    Day, Destination, EntryStatus, Idea, IdeaCategory, JournalEntry, JournalEntryKind, Location,
    Lodging, PlaceDetails, PlanEntry, Trip, User, Visibility,
};
