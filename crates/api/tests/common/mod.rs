#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

use lana_api::config::ServerConfig;
use lana_api::router::build_app_router;
use lana_api::state::AppState;
use lana_core::clock::ManualClock;
use lana_core::content::SiteContent;
use lana_core::inquiry::Inquiry;
use lana_core::locale::Locale;
use lana_core::rate_limit::{InMemoryRateLimitStore, RateLimitConfig, RateLimiter};
use lana_core::sections::InMemorySectionStore;
use lana_delivery::{InquiryMailer, MailError};
use uuid::Uuid;

pub const DASHBOARD_TOKEN: &str = "test-dashboard-token";

/// Site content used by every test app. One booked interval, 10-15 July 2025.
pub const SAMPLE_CONTENT: &str = r#"{
    "site": {
        "name": "Mobile Home Lana",
        "tagline": { "hr": "Odmor uz more", "en": "Holiday by the sea" },
        "address": { "street": "Kamp 1", "city": "Pakoštane", "country": "Hrvatska" },
        "contact": { "email": "info@example.com", "phone": "+385911234567" },
        "coordinates": { "lat": 43.9, "lng": 15.5 },
        "amenities": [{ "icon": "wifi", "label_hr": "Besplatni WiFi", "label_en": "Free WiFi" }],
        "house_rules_hr": ["Bez pušenja"],
        "house_rules_en": ["No smoking"]
    },
    "gallery": [{ "src": "/img/1.jpg", "alt_hr": "Terasa", "alt_en": "Terrace" }],
    "availability": [{ "startISO": "2025-07-10", "endISO": "2025-07-15" }],
    "sections": { "about": "Dobrodošli u Lanu" }
}"#;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as CORS origin (matching the dev default),
/// a 30-second request timeout and the production rate limit of 5/hour.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        content_path: "unused".to_string(),
        dashboard_token: Some(DASHBOARD_TOKEN.to_string()),
        rate_limit: RateLimitConfig::default(),
        rate_limit_sweep_interval: Duration::from_secs(600),
    }
}

// ---------------------------------------------------------------------------
// Mailers
// ---------------------------------------------------------------------------

/// Records every inquiry instead of sending it.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<(Inquiry, Locale)>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<(Inquiry, Locale)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl InquiryMailer for RecordingMailer {
    async fn send_inquiry(
        &self,
        inquiry: &Inquiry,
        locale: Locale,
        _reference: Uuid,
    ) -> Result<(), MailError> {
        self.sent.lock().unwrap().push((inquiry.clone(), locale));
        Ok(())
    }
}

/// Fails every send with a build error whose text must never reach clients.
pub struct FailingMailer;

#[async_trait::async_trait]
impl InquiryMailer for FailingMailer {
    async fn send_inquiry(
        &self,
        _inquiry: &Inquiry,
        _locale: Locale,
        _reference: Uuid,
    ) -> Result<(), MailError> {
        Err(MailError::Build("smtp.internal.example rejected credentials".into()))
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

pub struct TestApp {
    pub router: Router,
    pub mailer: Arc<RecordingMailer>,
    pub clock: Arc<ManualClock>,
}

/// 1 July 2025, 09:00 UTC. Before the booked interval, so July dates are bookable.
pub fn start_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 1, 9, 0, 0).unwrap()
}

/// Build the full application router, with a recording mailer and a manual
/// clock set to [`start_time`].
///
/// Uses the same [`build_app_router`] as `main.rs` so integration tests
/// exercise the production middleware stack.
pub fn build_test_app() -> TestApp {
    let mailer = Arc::new(RecordingMailer::default());
    let clock = Arc::new(ManualClock::new(start_time()));
    let router = build_app_with(test_config(), mailer.clone(), clock.clone());
    TestApp {
        router,
        mailer,
        clock,
    }
}

/// Same as [`build_test_app`] but every email send fails.
pub fn build_failing_app() -> Router {
    let clock = Arc::new(ManualClock::new(start_time()));
    build_app_with(test_config(), Arc::new(FailingMailer), clock)
}

pub fn build_app_with(
    config: ServerConfig,
    mailer: Arc<dyn InquiryMailer>,
    clock: Arc<ManualClock>,
) -> Router {
    let content = SiteContent::from_json_str(SAMPLE_CONTENT).unwrap();
    let sections = Arc::new(InMemorySectionStore::seeded(
        content.sections.clone(),
        start_time(),
    ));
    let rate_limiter = RateLimiter::new(
        config.rate_limit,
        clock.clone(),
        Arc::new(InMemoryRateLimitStore::new()),
    );

    let state = AppState {
        config: Arc::new(config.clone()),
        content: Arc::new(content),
        rate_limiter,
        mailer,
        sections,
        clock,
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request to the given URI and return the response.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a JSON body from a fixed client address.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    post_json_from(app, uri, body, "203.0.113.7").await
}

/// POST a JSON body as if proxied for `client_ip`.
pub async fn post_json_from(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    client_ip: &str,
) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-forwarded-for", client_ip)
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a raw body with only a socket peer address, no proxy headers.
pub async fn post_raw_from_peer(app: Router, uri: &str, body: &str, peer: SocketAddr) -> Response {
    let mut request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    request.extensions_mut().insert(ConnectInfo(peer));
    app.oneshot(request).await.unwrap()
}

/// PUT a JSON body, with an optional bearer token.
pub async fn put_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response {
    let mut builder = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A complete inquiry for 1-5 August 2025 that passes validation.
pub fn valid_inquiry() -> serde_json::Value {
    serde_json::json!({
        "name": "Ana Horvat",
        "email": "ana@example.com",
        "phone": "+385911234567",
        "guests": 4,
        "checkIn": "2025-08-01",
        "checkOut": "2025-08-05",
        "message": "Dolazimo s psom.",
        "locale": "hr"
    })
}

pub fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected, "unexpected status");
}
