use std::sync::{Arc, Mutex};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use journey_core::JourneyBuilder;
use journey_server::{analytics::Analytics, auth::TokenIssuer, router, AppState};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

/// Analytics sink that keeps every event with its properties.
#[derive(Default)]
struct RecordingAnalytics {
    events: Mutex<Vec<(String, Value)>>,
}

impl RecordingAnalytics {
    fn record(&self, name: String, properties: &Value) {
        self.events.lock().unwrap().push((name, properties.clone()));
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().iter().map(|(name, _)| name.clone()).collect()
    }

    fn properties(&self, name: &str) -> Option<Value> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(event, _)| event == name)
            .map(|(_, properties)| properties.clone())
    }
}

impl Analytics for RecordingAnalytics {
    fn identify(&self, _user_id: Option<Uuid>, traits: &Value) {
        self.record("identify".to_string(), traits);
    }

    fn track(&self, _user_id: Option<Uuid>, event: &str, properties: &Value) {
        self.record(event.to_string(), properties);
    }

    fn page(&self, _user_id: Option<Uuid>, name: &str, properties: &Value) {
        self.record(format!("page:{name}"), properties);
    }
}

struct TestApp {
    _temp_dir: TempDir,
    router: Router,
    analytics: Arc<RecordingAnalytics>,
}

impl TestApp {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let journey = JourneyBuilder::new()
            .with_database_path(Some(temp_dir.path().join("api.db")))
            .build()
            .await
            .expect("Failed to create journey");

        let analytics = Arc::new(RecordingAnalytics::default());
        let state = AppState::new(journey, TokenIssuer::from_days(b"test-secret", 1))
            .with_analytics(analytics.clone());

        Self {
            _temp_dir: temp_dir,
            router: router(state),
            analytics,
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, token);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// Signs up and returns `(user id, Authorization header value)`.
    async fn sign_up(&self, email: &str) -> (String, String) {
        let (status, body) = self
            .send(
                Method::POST,
                "/v1/users",
                None,
                Some(json!({ "email": email, "password": "abc123" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "sign up failed: {body}");
        (
            body["user"]["id"].as_str().unwrap().to_string(),
            body["token"].as_str().unwrap().to_string(),
        )
    }

    async fn create_trip(&self, token: &str, body: Value) -> Value {
        let (status, body) = self
            .send(Method::POST, "/v1/trips", Some(token), Some(body))
            .await;
        assert_eq!(status, StatusCode::OK, "create trip failed: {body}");
        body["trip"].clone()
    }
}

fn place(name: &str) -> Value {
    json!({
        "placeId": format!("gp-{name}"),
        "name": name,
        "location": { "type": "Point", "coordinates": [139.77, 35.68] },
        "types": ["museum"],
    })
}

fn names(ideas: &Value) -> Vec<String> {
    ideas
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_sign_up_and_login() {
    let app = TestApp::new().await;
    let (user_id, token) = app.sign_up("ana@example.com").await;
    assert!(token.starts_with("JWT "));

    let (status, body) = app
        .send(
            Method::POST,
            "/v1/auth/login",
            None,
            Some(json!({ "email": "ana@example.com", "password": "abc123" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], user_id.as_str());
    assert!(body["user"].get("passwordHash").is_none());

    let (status, body) = app
        .send(
            Method::POST,
            "/v1/auth/login",
            None,
            Some(json!({ "email": "ana@example.com", "password": "wrong1" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["message"].is_string());

    let (status, body) = app
        .send(
            Method::POST,
            "/v1/users",
            None,
            Some(json!({ "email": "ana@example.com", "password": "abc123" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "email already exists");

    let events = app.analytics.events();
    assert!(events.contains(&"Sign Up".to_string()));
    assert!(events.contains(&"Log In".to_string()));
}

#[tokio::test]
async fn test_ideas_reorder_and_bad_index() {
    let app = TestApp::new().await;
    let (_, token) = app.sign_up("ana@example.com").await;
    let trip = app.create_trip(&token, json!({ "title": "Tokyo" })).await;
    let trip_id = trip["id"].as_str().unwrap();
    let ideas_uri = format!("/v1/trips/{trip_id}/ideas");

    for name in ["Ueno", "Ginza"] {
        let (status, _) = app
            .send(Method::POST, &ideas_uri, Some(&token), Some(place(name)))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = app.send(Method::GET, &ideas_uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body["ideas"]), ["Ginza", "Ueno"]);
    let ginza = body["ideas"][0]["id"].clone();

    let ueno = body["ideas"][1]["id"].as_str().unwrap().to_string();
    let idea_uri = format!("{ideas_uri}/{ueno}");

    let (status, body) = app
        .send(
            Method::PUT,
            &idea_uri,
            Some(&token),
            Some(json!({ "index": 0, "comment": "go early" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body["ideas"]), ["Ueno", "Ginza"]);
    assert_eq!(body["ideas"][0]["comment"], "go early");

    let (status, body) = app
        .send(Method::PUT, &idea_uri, Some(&token), Some(json!({ "index": 5 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let (_, body) = app.send(Method::GET, &ideas_uri, None, None).await;
    assert_eq!(names(&body["ideas"]), ["Ueno", "Ginza"]);

    let tracked = app
        .analytics
        .properties("Add Trip Idea")
        .expect("Add Trip Idea should be tracked");
    assert_eq!(tracked["tripId"], trip_id);
    assert_eq!(tracked["ideaId"], ginza);
}

#[tokio::test]
async fn test_plan_promote_and_demote() {
    let app = TestApp::new().await;
    let (_, token) = app.sign_up("ana@example.com").await;
    let trip = app.create_trip(&token, json!({ "title": "Tokyo" })).await;
    let trip_id = trip["id"].as_str().unwrap();
    let day_id = trip["plan"][0]["id"].as_str().unwrap();

    let (_, body) = app
        .send(
            Method::POST,
            &format!("/v1/trips/{trip_id}/ideas"),
            Some(&token),
            Some(place("Ueno")),
        )
        .await;
    let idea_id = body["ideas"][0]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/v1/trips/{trip_id}/plan/{day_id}/entries"),
            Some(&token),
            Some(json!({ "idea": idea_id })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["dayId"], day_id);
    let entry_id = body["entries"][0]["id"].as_str().unwrap().to_string();

    let (_, body) = app
        .send(Method::GET, &format!("/v1/trips/{trip_id}/ideas"), None, None)
        .await;
    assert!(body["ideas"].as_array().unwrap().is_empty());

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/v1/trips/{trip_id}/plan/{day_id}/entries/{entry_id}"),
            Some(&token),
            Some(json!({ "dayId": Uuid::new_v4() })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/v1/trips/{trip_id}/plan/{day_id}/entries/{entry_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .send(Method::GET, &format!("/v1/trips/{trip_id}/ideas"), None, None)
        .await;
    assert_eq!(names(&body["ideas"]), ["Ueno"]);
}

#[tokio::test]
async fn test_access_errors() {
    let app = TestApp::new().await;
    let (owner_id, owner) = app.sign_up("owner@example.com").await;
    let (_, other) = app.sign_up("other@example.com").await;

    let trip = app
        .create_trip(&owner, json!({ "title": "Secret", "visibility": "private" }))
        .await;
    let trip_uri = format!("/v1/trips/{}", trip["id"].as_str().unwrap());

    let (status, _) = app.send(Method::GET, &trip_uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app.send(Method::GET, &trip_uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app.send(Method::GET, &trip_uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send(Method::GET, &format!("/v1/users/{owner_id}"), Some(&other), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(
            Method::GET,
            &format!("/v1/trips/{}", Uuid::new_v4()),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Trip not found");

    let (status, _) = app
        .send(Method::GET, &trip_uri, Some("JWT not-a-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(Method::POST, "/v1/trips", None, Some(json!({ "title": "Nope" })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = TestApp::new().await;
    let (_, token) = app.sign_up("ana@example.com").await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/v1/trips")
        .header(header::AUTHORIZATION, &token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_journal_entries() {
    let app = TestApp::new().await;
    let (user_id, token) = app.sign_up("ana@example.com").await;
    let entries_uri = format!("/v1/users/{user_id}/entries");

    let (status, _) = app.send(Method::GET, &entries_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .send(
            Method::POST,
            "/v1/entries",
            Some(&token),
            Some(json!({ "type": "text", "message": "Landed in Narita" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let entry_id = body["entry"]["id"].as_str().unwrap().to_string();

    let (status, body) = app.send(Method::GET, &entries_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"], 1);
    assert_eq!(body["page"], 1);

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/v1/entries/{entry_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_analytics_endpoints() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(Method::POST, "/v1/analytics/track", None, Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing 'event'");

    let (status, _) = app
        .send(
            Method::POST,
            "/v1/analytics/track",
            None,
            Some(json!({ "event": "Open App" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send(
            Method::POST,
            "/v1/analytics/page",
            None,
            Some(json!({ "name": "Home" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(app.analytics.events(), ["Open App", "page:Home"]);
}

#[tokio::test]
async fn test_remove_entry_ignore_idea_create_flag() {
    let app = TestApp::new().await;
    let (_, token) = app.sign_up("ana@example.com").await;
    let trip = app.create_trip(&token, json!({ "title": "Tokyo" })).await;
    let trip_id = trip["id"].as_str().unwrap();
    let day_id = trip["plan"][0]["id"].as_str().unwrap();
    let entries_uri = format!("/v1/trips/{trip_id}/plan/{day_id}/entries");
    let ideas_uri = format!("/v1/trips/{trip_id}/ideas");

    for (query, demoted) in [
        ("?ignoreIdeaCreate=1", false),
        ("?ignoreIdeaCreate=true", false),
        ("?ignoreIdeaCreate", true),
        ("?ignoreIdeaCreate=false", true),
    ] {
        let (status, body) = app
            .send(Method::POST, &entries_uri, Some(&token), Some(place("Ueno")))
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        let entry_id = body["entries"][0]["id"].as_str().unwrap().to_string();

        let (status, body) = app
            .send(
                Method::DELETE,
                &format!("{entries_uri}/{entry_id}{query}"),
                Some(&token),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{query}: {body}");

        let (_, body) = app.send(Method::GET, &ideas_uri, None, None).await;
        let ideas = body["ideas"].as_array().unwrap();
        assert_eq!(!ideas.is_empty(), demoted, "{query}");

        app.send(Method::DELETE, &ideas_uri, Some(&token), None).await;
    }
}

#[tokio::test]
async fn test_malformed_ids_and_queries_use_json_errors() {
    let app = TestApp::new().await;
    let (user_id, token) = app.sign_up("ana@example.com").await;
    let trip = app.create_trip(&token, json!({ "title": "Tokyo" })).await;
    let trip_id = trip["id"].as_str().unwrap();

    let (status, body) = app
        .send(Method::GET, "/v1/trips/not-a-trip", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Trip not found");

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/v1/trips/{trip_id}/ideas/42"),
            Some(&token),
            Some(json!({ "comment": "x" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Trip idea not found");

    let (status, body) = app
        .send(Method::GET, "/v1/entries/nope", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Entry not found");

    let (status, body) = app
        .send(
            Method::GET,
            &format!("/v1/users/{user_id}/trips?count=many"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}
