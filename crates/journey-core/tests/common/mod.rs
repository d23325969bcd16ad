#![allow(dead_code)]

use journey_core::{params::SignUp, Caller, Journey, JourneyBuilder};
use tempfile::TempDir;

/// Helper function to create a test service
pub async fn create_test_journey() -> (TempDir, Journey) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let journey = JourneyBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create journey");
    (temp_dir, journey)
}

/// Signs up a user with a valid password and returns them as a caller.
pub async fn sign_up(journey: &Journey, email: &str, username: Option<&str>) -> Caller {
    let user = journey
        .sign_up(SignUp {
            email: email.to_string(),
            password: "abc123".to_string(),
            name: None,
            username: username.map(String::from),
        })
        .await
        .expect("Failed to sign up");
    Caller::User(user.id)
}
