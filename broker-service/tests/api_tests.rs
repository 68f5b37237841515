mod common;

use common::spawn_canned_auth_service;
use common::unreachable_url;
use common::TestApp;
use common::USER_EMAIL;
use common::USER_PASSWORD;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_broker_is_reachable() {
    let app = TestApp::spawn(unreachable_url().await).await;

    let response = app
        .post("/")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "error": false, "message": "The broker is reachable" })
    );
}

#[tokio::test]
async fn test_auth_success_matches_direct_call() {
    let app = TestApp::spawn_with_auth_service().await;
    let credentials = json!({ "email": USER_EMAIL, "password": USER_PASSWORD });

    let response = app
        .post("/handle")
        .json(&json!({ "action": "auth", "auth": credentials }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let brokered: serde_json::Value = response.json().await.unwrap();
    assert_eq!(brokered["error"], false);
    assert_eq!(brokered["message"], "Authenticated!");

    let direct: serde_json::Value = app
        .api_client
        .post(format!("{}/authenticate", app.auth_service_url))
        .json(&credentials)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();

    // Same payload shape; tokens differ only if issued in different seconds
    let brokered_keys: Vec<_> = brokered["data"].as_object().unwrap().keys().collect();
    let direct_keys: Vec<_> = direct["data"].as_object().unwrap().keys().collect();
    assert_eq!(brokered_keys, direct_keys);
    assert_eq!(brokered["data"]["email"], USER_EMAIL);
    assert_eq!(brokered["data"]["first_name"], "Jane");
    assert_eq!(brokered["data"]["last_name"], "Doe");
    assert!(brokered["data"]["token"].as_str().unwrap().len() > 0);
}

#[tokio::test]
async fn test_auth_wrong_password() {
    let app = TestApp::spawn_with_auth_service().await;

    let response = app
        .post("/handle")
        .body(r#"{"action":"auth","auth":{"email":"user@example.com","password":"wrong"}}"#)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], true);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("invalid credentials"));
}

#[tokio::test]
async fn test_unknown_action_does_not_call_backend() {
    // Nothing listens downstream: contacting it would yield "error calling auth service"
    let app = TestApp::spawn(unreachable_url().await).await;

    let response = app
        .post("/handle")
        .json(&json!({ "action": "ping" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": true, "message": "unknown action" }));
}

#[tokio::test]
async fn test_concatenated_bodies_are_malformed() {
    let app = TestApp::spawn_with_auth_service().await;

    let response = app
        .post("/handle")
        .body(r#"{"action":"auth"}{"action":"auth"}"#)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], true);
    assert_eq!(body["message"], "body must have only a single JSON value");
}

#[tokio::test]
async fn test_auth_action_without_payload() {
    let app = TestApp::spawn(unreachable_url().await).await;

    let response = app
        .post("/handle")
        .json(&json!({ "action": "auth" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "missing auth payload");
}

#[tokio::test]
async fn test_downstream_error_envelope_with_accepted_status() {
    let downstream = spawn_canned_auth_service(
        axum::http::StatusCode::ACCEPTED,
        json!({ "error": true, "message": "something went wrong" }),
    )
    .await;
    let app = TestApp::spawn(downstream).await;

    let response = app
        .post("/handle")
        .json(&json!({ "action": "auth", "auth": { "email": USER_EMAIL, "password": USER_PASSWORD } }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": true, "message": "invalid credentials" }));
}

#[tokio::test]
async fn test_downstream_unauthorized() {
    let downstream = spawn_canned_auth_service(
        axum::http::StatusCode::UNAUTHORIZED,
        json!({ "error": true, "message": "invalid credentials" }),
    )
    .await;
    let app = TestApp::spawn(downstream).await;

    let response = app
        .post("/handle")
        .json(&json!({ "action": "auth", "auth": { "email": USER_EMAIL, "password": USER_PASSWORD } }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_downstream_unexpected_status() {
    let downstream = spawn_canned_auth_service(
        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": true, "message": "database is down" }),
    )
    .await;
    let app = TestApp::spawn(downstream).await;

    let response = app
        .post("/handle")
        .json(&json!({ "action": "auth", "auth": { "email": USER_EMAIL, "password": USER_PASSWORD } }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "error": true, "message": "error calling auth service" })
    );
}

#[tokio::test]
async fn test_downstream_unreachable() {
    let app = TestApp::spawn(unreachable_url().await).await;

    let response = app
        .post("/handle")
        .json(&json!({ "action": "auth", "auth": { "email": USER_EMAIL, "password": USER_PASSWORD } }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "error calling auth service");
}
