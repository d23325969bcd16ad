//! Startup of the [`Journey`] service: locating the SQLite file and bringing
//! its schema up before the first request arrives.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Journey;
use crate::{
    db::Database,
    error::{JourneyError, Result},
};

/// XDG prefix and file name of the store when no path is configured.
const DATA_PREFIX: &str = "journey";
const DATA_FILE: &str = "journey.db";

/// Configures where a [`Journey`] keeps its users, trips and journal.
#[derive(Debug, Clone, Default)]
pub struct JourneyBuilder {
    database_path: Option<PathBuf>,
}

impl JourneyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store file to use. `None` keeps the per-user default,
    /// `$XDG_DATA_HOME/journey/journey.db`, so an unset CLI option can be
    /// passed straight through.
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Opens the store once so that a missing directory, an unreadable file
    /// or a schema error fails startup instead of the first request.
    ///
    /// # Errors
    ///
    /// Returns `JourneyError::XdgDirectory` if no default location can be resolved
    /// Returns `JourneyError::FileSystem` if the parent directory cannot be created
    /// Returns `JourneyError::Database` if the schema cannot be applied
    pub async fn build(self) -> Result<Journey> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => default_database_path()?,
        };

        // a bare file name has an empty parent, which is the working directory
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| JourneyError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let schema_path = db_path.clone();
        task::spawn_blocking(move || Database::new(&schema_path).map(drop))
            .await
            .map_err(|e| JourneyError::Configuration {
                message: format!("Task join error: {e}"),
            })??;

        log::debug!("database ready at {}", db_path.display());
        Ok(Journey::new(db_path))
    }
}

fn default_database_path() -> Result<PathBuf> {
    xdg::BaseDirectories::with_prefix(DATA_PREFIX)
        .place_data_file(DATA_FILE)
        .map_err(|e| JourneyError::XdgDirectory(e.to_string()))
}
