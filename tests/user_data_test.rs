use reqwest::Client;
use serde_json::{json, Value};

mod common;
use common::utils::{get_json, seed_user, spawn_app};

#[tokio::test]
async fn get_user_data_working() {
    let test_app = spawn_app().await;
    let client = Client::new();
    seed_user(&test_app, "uid-1", json!({"name": "Kim", "goalSteps": 10000})).await;

    let (status, body) = get_json(&client, &format!("{}/api/auth/user-data/uid-1", &test_app.address)).await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({
        "success": true,
        "user": {"name": "Kim", "goalSteps": 10000}
    }));
}

#[tokio::test]
async fn get_unknown_user_returns_404() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let (status, body) = get_json(&client, &format!("{}/api/auth/user-data/ghost", &test_app.address)).await;

    assert_eq!(status, 404);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn update_user_data_merges_fields() {
    let test_app = spawn_app().await;
    let client = Client::new();
    seed_user(&test_app, "uid-1", json!({"name": "Kim", "goalSteps": 10000})).await;

    let response = client
        .put(&format!("{}/api/auth/update-user/uid-1", &test_app.address))
        .json(&json!({"goalSteps": 12000, "city": "Seoul"}))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Cannot turn into a json.");
    assert_eq!(body["success"], json!(true));

    let (_, body) = get_json(&client, &format!("{}/api/auth/user-data/uid-1", &test_app.address)).await;
    assert_eq!(body["user"], json!({"name": "Kim", "goalSteps": 12000, "city": "Seoul"}));
}

#[tokio::test]
async fn update_unknown_user_returns_404() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let response = client
        .put(&format!("{}/api/auth/update-user/ghost", &test_app.address))
        .json(&json!({"name": "Nobody"}))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn update_user_data_requires_object_body() {
    let test_app = spawn_app().await;
    let client = Client::new();
    seed_user(&test_app, "uid-1", json!({"name": "Kim"})).await;

    let response = client
        .put(&format!("{}/api/auth/update-user/uid-1", &test_app.address))
        .json(&json!(["not", "an", "object"]))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 400);
}
