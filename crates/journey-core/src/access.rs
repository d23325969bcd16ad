//! Trip access control.
//!
//! Whether a caller may read or modify a trip depends only on the trip's
//! visibility and on whether the caller created it:
//!
//! | visibility | creator    | anyone else |
//! |------------|------------|-------------|
//! | `public`   | read/write | read        |
//! | `viewOnly` | read/write | read        |
//! | `private`  | read/write | none        |
//!
//! Ideas, days and plan entries inherit the rules of their trip.

use uuid::Uuid;

use crate::{
    error::{JourneyError, Result},
    models::{Trip, Visibility},
};

/// Identity of whoever issued a request, as resolved by the authentication
/// layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Caller {
    #[default]
    Anonymous,
    User(Uuid),
}

impl Caller {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Caller::Anonymous => None,
            Caller::User(id) => Some(*id),
        }
    }
}

impl From<Option<Uuid>> for Caller {
    fn from(id: Option<Uuid>) -> Self {
        id.map_or(Caller::Anonymous, Caller::User)
    }
}

/// What the caller intends to do with the trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
}

/// Decides whether `caller` may perform `operation` on `trip`.
///
/// Denials carry no detail about the trip.
pub fn check_access(caller: Caller, trip: &Trip, operation: Operation) -> Result<()> {
    if caller
        .user_id()
        .is_some_and(|user_id| trip.is_owned_by(user_id))
    {
        return Ok(());
    }

    match (operation, trip.visibility) {
        (Operation::Write, _) => Err(JourneyError::NotAuthorized),
        (Operation::Read, Visibility::Public | Visibility::ViewOnly) => Ok(()),
        (Operation::Read, Visibility::Private) => Err(JourneyError::NotAuthorized),
    }
}
