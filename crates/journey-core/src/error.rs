//! Error types for the journey library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all journey operations.
#[derive(Error, Debug)]
pub enum JourneyError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// A trip, idea, day, entry or user could not be found by its ID
    #[error("{resource} not found")]
    NotFound { resource: Resource, id: String },
    /// The destination of a cross-list move does not exist
    #[error("Target trip day not found")]
    TargetNotFound { id: String },
    /// Requested position is outside the allowed range of an ordered list
    #[error("Invalid index {index}: list has {len} items")]
    InvalidIndex { index: i64, len: usize },
    /// Caller may not read or modify the trip
    #[error("Not Authorized")]
    NotAuthorized,
    /// Caller is authenticated but acting on another user's account
    #[error("{reason}")]
    Forbidden { reason: String },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Login failed
    #[error("Invalid username, email or password")]
    InvalidCredentials,
    /// Unique field collision (email, username)
    #[error("{field} already exists")]
    AlreadyExists { field: String },
    /// The trip was written by someone else since it was read
    #[error("Trip {id} was modified concurrently, reload and retry")]
    RevisionConflict { id: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Password hashing failures
    #[error("Password hashing error: {0}")]
    PasswordHash(String),
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Kinds of addressable resources, used in not-found errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Trip,
    Idea,
    Day,
    PlanEntry,
    User,
    JournalEntry,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Resource::Trip => "Trip",
            Resource::Idea => "Trip idea",
            Resource::Day => "Trip day",
            Resource::PlanEntry => "Trip entry",
            Resource::User => "User",
            Resource::JournalEntry => "Entry",
        };
        f.write_str(name)
    }
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> JourneyError {
        JourneyError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> JourneyError {
        JourneyError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl JourneyError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Not-found error for the given resource kind and id.
    pub fn not_found(resource: Resource, id: impl ToString) -> Self {
        JourneyError::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| JourneyError::database(message).with_source(e))
    }
}

/// Result type alias for journey operations
pub type Result<T> = std::result::Result<T, JourneyError>;
