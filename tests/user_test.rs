//! Integration tests for API tokens, notification targets, and password change.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use accounthub_entity::notification::NotificationChannel;

#[tokio::test]
async fn test_api_token_lifecycle() {
    let app = helpers::TestApp::new();
    app.signup("alice", "password123", "alice@example.com").await;
    let session = app.login("alice", "password123").await;

    let created = app
        .request(
            "POST",
            "/api/v1/users/tokens",
            Some(json!({ "name": "ci-bot" })),
            Some(&session),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let api_token = created.data()["token"].as_str().unwrap().to_string();
    let token_id = created.data()["id"].as_i64().unwrap();

    let listed = app
        .request("GET", "/api/v1/users/tokens", None, Some(&session))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    let items = listed.data().as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "ci-bot");
    assert!(items[0].get("token").is_none());
    assert!(items[0].get("token_hash").is_none());
    assert!(!listed.body.to_string().contains(&api_token));

    let profile = app
        .request("GET", "/api/v1/users/profile", None, Some(&api_token))
        .await;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.data()["username"], "alice");

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/v1/users/tokens/{token_id}"),
            None,
            Some(&session),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let revoked = app
        .request("GET", "/api/v1/users/profile", None, Some(&api_token))
        .await;
    assert_eq!(revoked.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_names_are_global() {
    let app = helpers::TestApp::new();
    app.signup("alice", "password123", "alice@example.com").await;
    app.signup("bobby", "password123", "bobby@example.com").await;
    let alice = app.login("alice", "password123").await;
    let bob = app.login("bobby", "password123").await;

    let first = app
        .request(
            "POST",
            "/api/v1/users/tokens",
            Some(json!({ "name": "deploy" })),
            Some(&alice),
        )
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let clash = app
        .request(
            "POST",
            "/api/v1/users/tokens",
            Some(json!({ "name": "deploy" })),
            Some(&bob),
        )
        .await;
    assert_eq!(clash.status, StatusCode::CONFLICT);
    assert_eq!(clash.body["error"], "NAME_CONFLICT");
}

#[tokio::test]
async fn test_cannot_delete_another_users_token() {
    let app = helpers::TestApp::new();
    app.signup("alice", "password123", "alice@example.com").await;
    app.signup("bobby", "password123", "bobby@example.com").await;
    let alice = app.login("alice", "password123").await;
    let bob = app.login("bobby", "password123").await;

    let created = app
        .request(
            "POST",
            "/api/v1/users/tokens",
            Some(json!({ "name": "ci-bot" })),
            Some(&alice),
        )
        .await;
    let token_id = created.data()["id"].as_i64().unwrap();

    let response = app
        .request(
            "DELETE",
            &format!("/api/v1/users/tokens/{token_id}"),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let listed = app
        .request("GET", "/api/v1/users/tokens", None, Some(&alice))
        .await;
    assert_eq!(listed.data().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_notification_target_binding() {
    let app = helpers::TestApp::new();
    let id = app.signup("alice", "password123", "alice@example.com").await;
    let session = app.login("alice", "password123").await;

    let pending = app
        .store
        .schedule_notification(id, NotificationChannel::Telegram)
        .await;

    let set = app
        .request(
            "PUT",
            "/api/v1/users/targets",
            Some(json!({ "type": "webhook" })),
            Some(&session),
        )
        .await;
    assert_eq!(set.status, StatusCode::OK);
    assert_eq!(set.data()["type"], "webhook");

    let notifications = app.store.notifications_for(id).await;
    let retargeted = notifications.iter().find(|n| n.id == pending).unwrap();
    assert_eq!(retargeted.channel, NotificationChannel::Webhook);

    let cleared = app
        .request(
            "PUT",
            "/api/v1/users/targets",
            Some(json!({ "type": "none" })),
            Some(&session),
        )
        .await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert!(cleared.data()["type"].is_null());

    let current = app
        .request("GET", "/api/v1/users/targets", None, Some(&session))
        .await;
    assert!(current.data()["type"].is_null());
}

#[tokio::test]
async fn test_change_password() {
    let app = helpers::TestApp::new();
    app.signup("alice", "password123", "alice@example.com").await;
    let session = app.login("alice", "password123").await;

    let too_short = app
        .request(
            "PUT",
            "/api/v1/users/change_password",
            Some(json!({ "password": "short" })),
            Some(&session),
        )
        .await;
    assert_eq!(too_short.status, StatusCode::BAD_REQUEST);

    let changed = app
        .request(
            "PUT",
            "/api/v1/users/change_password",
            Some(json!({ "password": "newpassword1" })),
            Some(&session),
        )
        .await;
    assert_eq!(changed.status, StatusCode::OK);

    app.login("alice", "newpassword1").await;
    let old = app.try_login("alice", "password123").await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);
}
