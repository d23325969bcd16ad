//! High-level service API for trips, users and journal entries.
//!
//! [`Journey`] is the entry point the HTTP layer talks to. Every method is
//! async and runs its database work on tokio's blocking pool, opening a
//! fresh [`Database`](crate::db::Database) connection for each call. No
//! trip state is held between calls.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Operations    │    │    Aggregate    │    │    Database     │
//! │ (trip_ops,      │───▶│ (Trip methods,  │───▶│   (via db/)     │
//! │  user_ops, ...) │    │  ordering)      │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!   access checks          validate + mutate      compare-and-swap
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for [`Journey`] instances
//! - [`trip_ops`]: Trips, ideas, plan days and plan entries
//! - [`user_ops`]: Sign-up, login and account management
//! - [`journal_ops`]: Journal entries
//!
//! # Example
//!
//! ```rust,no_run
//! use journey_core::{params::{CreateTrip, NewIdea}, Caller, JourneyBuilder};
//! use journey_core::models::{Location, PlaceDetails};
//! use journey_core::params::SignUp;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let journey = JourneyBuilder::new()
//!     .with_database_path(Some("/tmp/journey-example.db"))
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
//! let caller = Caller::User(user.id);
//!
//! let trip = journey
//!     .create_trip(caller, CreateTrip { title: "Lisbon".to_string(), ..Default::default() })
//!     .await?;
//!
//! let place = PlaceDetails::new("p-1", "Belem Tower", Location::point(-9.21, 38.69));
//! let (trip, _idea_id) = journey
//!     .add_idea(caller, trip.id, NewIdea { place, category: None, index: None })
//!     .await?;
//! assert_eq!(trip.ideas.len(), 1);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use tokio::task;

use crate::{
    db::Database,
    error::{JourneyError, Result},
};

pub mod builder;
pub mod journal_ops;
pub mod trip_ops;
pub mod user_ops;


pub use builder::JourneyBuilder;

/// Main service interface.
#[derive(Debug, Clone)]
pub struct Journey {
    pub(crate) db_path: PathBuf,
}

impl Journey {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Path of the SQLite file this instance works on.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Runs `f` against a fresh connection on the blocking pool.
    pub(crate) async fn with_database<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db)
        })
        .await
        .map_err(|e| JourneyError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
