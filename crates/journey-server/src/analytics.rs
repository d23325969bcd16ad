//! Product analytics hooks.
//!
//! Handlers report what users do through the [`Analytics`] trait. The
//! server ships with [`LogAnalytics`], which writes every event to the log
//! under the `journey::analytics` target. A different sink can be plugged
//! in through [`AppState::with_analytics`](crate::state::AppState::with_analytics).

use serde_json::Value;
use uuid::Uuid;

/// Event names used by the API handlers.
pub mod events {
    pub const LOG_IN: &str = "Log In";
    pub const SIGN_UP: &str = "Sign Up";
    pub const VIEW_USER: &str = "View User Information";
    pub const UPDATE_USER: &str = "Update User Information";
    pub const DELETE_USER: &str = "Delete User";
    pub const CREATE_TRIP: &str = "Create Trip";
    pub const DELETE_TRIP: &str = "Delete Trip";
    pub const ADD_TRIP_IDEA: &str = "Add Trip Idea";
}

pub trait Analytics: Send + Sync {
    /// Associates traits (email, name, ...) with a user.
    fn identify(&self, user_id: Option<Uuid>, traits: &Value);

    /// Records that a user did something.
    fn track(&self, user_id: Option<Uuid>, event: &str, properties: &Value);

    /// Records a page view.
    fn page(&self, user_id: Option<Uuid>, name: &str, properties: &Value);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogAnalytics;

fn who(user_id: Option<Uuid>) -> String {
    user_id.map_or_else(|| "anonymous".to_string(), |id| id.to_string())
}

impl Analytics for LogAnalytics {
    fn identify(&self, user_id: Option<Uuid>, traits: &Value) {
        log::info!(target: "journey::analytics", "identify {} {traits}", who(user_id));
    }

    fn track(&self, user_id: Option<Uuid>, event: &str, properties: &Value) {
        log::info!(target: "journey::analytics", "track {} \"{event}\" {properties}", who(user_id));
    }

    fn page(&self, user_id: Option<Uuid>, name: &str, properties: &Value) {
        log::info!(target: "journey::analytics", "page {} \"{name}\" {properties}", who(user_id));
    }
}
