use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::sync::Arc;

use health_tracker_backend::run;
use health_tracker_backend::auth::jwt::JwtTokenVerifier;
use health_tracker_backend::config::jwt::JwtSettings;
use health_tracker_backend::db::document_store::DocumentData;
use health_tracker_backend::db::memory_store::InMemoryStore;
use health_tracker_backend::models::user::TokenClaims;
use health_tracker_backend::telemetry::{get_subscriber, init_subscriber};

pub const TEST_SECRET: &str = "integration-test-secret";

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryStore>,
}

pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let store = Arc::new(InMemoryStore::new());
    let verifier = Arc::new(JwtTokenVerifier::new(&JwtSettings::new(TEST_SECRET.to_string(), 0)));
    let server = run(
        listener,
        store.clone(),
        verifier,
        vec!["http://localhost:3000".to_string()],
    )
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    TestApp { address, store }
}

pub fn object(value: Value) -> DocumentData {
    match value {
        Value::Object(map) => map,
        other => panic!("Expected a JSON object, got {}", other),
    }
}

pub async fn seed_user(app: &TestApp, uid: &str, profile: Value) {
    app.store.set("users", uid, object(profile)).await;
}

pub fn issue_token(uid: &str, secret: &str, expires_in: Duration) -> String {
    let now = Utc::now();
    let claims = TokenClaims {
        sub: uid.to_string(),
        exp: (now + expires_in).timestamp() as usize,
        iat: Some(now.timestamp() as usize),
        user_id: None,
        email: None,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to encode token")
}

/// Add a health record and return its document id.
pub async fn add_health_record(client: &Client, app: &TestApp, body: Value) -> String {
    let response = client
        .post(&format!("{}/api/health/data", &app.address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 201);

    let json: Value = response.json().await.expect("Cannot turn into a json.");
    json["docId"].as_str().expect("No docId in response").to_string()
}

pub async fn get_json(client: &Client, url: &str) -> (u16, Value) {
    let response = client
        .get(url)
        .send()
        .await
        .expect("Failed to execute request.");
    let status = response.status().as_u16();
    let body = response.json().await.unwrap_or(json!(null));
    (status, body)
}
